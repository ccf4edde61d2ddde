//! Vibration-pattern vocabulary shared by the backend payloads and the GIF
//! renderer.

pub mod model;

pub use model::{MotorSample, PatternError, PatternFile, PatternIteration, GRID_COLS, GRID_ROWS};
