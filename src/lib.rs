//! Music box library - a step grid scrolling past a trigger line

pub mod audio;
pub mod cli;
pub mod color;
pub mod music_box;
pub mod params;
pub mod rendering;
pub mod square;
pub mod surface;
pub mod tone;

#[cfg(test)]
mod testing;
