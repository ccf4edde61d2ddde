//! Pattern-to-frames rendering.

use haptic_core::{PatternError, PatternFile};

use crate::domain::grid::GridFrame;

/// Renders each pattern iteration as one amplitude grid.
///
/// Every frame starts silent; each sample then lights its motor. A sample
/// addressing a motor twice in one iteration keeps the later amplitude, in
/// file order.
///
/// # Errors
///
/// [`PatternError::InvalidCoordinate`] if any sample addresses a motor
/// outside the grid — a bad coordinate means a broken pattern file, not a
/// pixel to skip.
pub fn render_frames(pattern: &PatternFile) -> Result<Vec<GridFrame>, PatternError> {
    pattern
        .pattern
        .iter()
        .map(|step| {
            let mut frame = GridFrame::new();
            for sample in &step.iteration {
                let (row, col) = sample.cell()?;
                frame.cells[row][col] = sample.amplitude;
            }
            Ok(frame)
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
