//! Grid geometry and pitch layout.

use super::ParamError;

/// Grid layout parameters
#[derive(Debug, Clone)]
pub struct GridParams {
    /// Number of rows (one pitch per row)
    pub rows: u32,

    /// Number of columns on the conveyor (wrapping point is `cols - 1`)
    pub cols: u32,

    /// Square edge length (pixels)
    pub cell_size_px: f32,

    /// Lower edge of the octave band (Hz); row 0 sounds at this pitch
    pub base_frequency_hz: f32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            rows: 12,
            cols: 32,
            cell_size_px: 40.0,
            base_frequency_hz: 440.0, // rows climb from 440 toward 880
        }
    }
}

impl GridParams {
    /// Gap that pads every cell: `floor(size / 2.5)`
    pub fn offset_px(&self) -> f32 {
        (self.cell_size_px / 2.5).floor()
    }

    /// Canvas height needed to show every row plus a trailing margin
    pub fn canvas_height(&self) -> f32 {
        let rows = self.rows as f32;
        self.cell_size_px * rows + (self.cell_size_px / 2.5) * rows + self.cell_size_px
    }

    /// Pitch of a row, rising linearly across one octave toward the bottom
    /// of the grid
    pub fn frequency_for_row(&self, row: u32) -> f32 {
        self.base_frequency_hz + (self.base_frequency_hz / self.rows as f32) * row as f32
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ParamError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(ParamError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(self.cell_size_px >= 1.0) {
            return Err(ParamError::CellSize(self.cell_size_px));
        }
        if !(self.base_frequency_hz > 0.0) {
            return Err(ParamError::BaseFrequency(self.base_frequency_hz));
        }
        Ok(())
    }
}
