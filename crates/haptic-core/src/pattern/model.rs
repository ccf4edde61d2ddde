//! On-disk pattern shape and the motor-grid coordinate scheme.
//!
//! A pattern file is JSON of the form:
//!
//! ```json
//! {
//!     "pattern": [
//!         { "iteration": [ { "coord": 14, "amplitude": 255 } ] }
//!     ]
//! }
//! ```
//!
//! Each iteration is one animation step; each sample drives one motor of the
//! 6-row × 4-column grid. The coordinate is two digits: the first digit is
//! the column (1–4), the second the row (1–6), both one-based. Unknown extra
//! fields in pattern files are tolerated and ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Motor grid height.
pub const GRID_ROWS: usize = 6;

/// Motor grid width.
pub const GRID_COLS: usize = 4;

/// Errors raised when interpreting pattern data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// The two-digit coordinate does not address a motor on the grid.
    #[error("invalid motor coordinate {coord}: expected column 1-4 and row 1-6")]
    InvalidCoordinate { coord: u8 },
}

/// A complete pattern file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFile {
    pub pattern: Vec<PatternIteration>,
}

/// One animation step of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternIteration {
    pub iteration: Vec<MotorSample>,
}

/// One motor activation within an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorSample {
    /// Two-digit grid coordinate: column digit then row digit.
    pub coord: u8,
    /// Vibration strength, 0–255.
    pub amplitude: u8,
}

impl MotorSample {
    /// Decodes the coordinate into zero-based `(row, col)` grid indices.
    ///
    /// # Errors
    ///
    /// [`PatternError::InvalidCoordinate`] when either digit falls outside
    /// the grid.
    pub fn cell(&self) -> Result<(usize, usize), PatternError> {
        let col = (self.coord / 10) as usize;
        let row = (self.coord % 10) as usize;
        if !(1..=GRID_COLS).contains(&col) || !(1..=GRID_ROWS).contains(&row) {
            return Err(PatternError::InvalidCoordinate { coord: self.coord });
        }
        Ok((row - 1, col - 1))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
