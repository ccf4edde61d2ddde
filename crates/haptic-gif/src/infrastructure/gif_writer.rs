//! Pattern file reading and GIF encoding.
//!
//! One motor is one pixel: frames are written at the grid's native 4×6
//! resolution with gray level = amplitude. Image viewers scale GIFs up
//! anyway, and the tiny files are convenient to commit next to the pattern
//! JSON they preview.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Rgba, RgbaImage};
use thiserror::Error;
use tracing::debug;

use haptic_core::{PatternError, PatternFile};

use crate::application::render::render_frames;
use crate::domain::grid::GridFrame;
use crate::domain::settings::ConverterSettings;

/// Errors raised while converting a pattern file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A file system error on the input or output path.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not a parseable pattern file.
    #[error("failed to parse pattern file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The pattern addresses a motor outside the grid.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// GIF encoding failed.
    #[error("failed to encode GIF: {0}")]
    Encode(#[from] image::ImageError),
}

/// Reads and parses one pattern file.
///
/// # Errors
///
/// [`ConvertError::Io`] if the file cannot be read, [`ConvertError::Parse`]
/// if it is not a pattern file.
pub fn load_pattern(path: &Path) -> Result<PatternFile, ConvertError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Encodes `frames` as an endlessly looping GIF at `path`.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// [`ConvertError::Io`] for file system failures, [`ConvertError::Encode`]
/// if the encoder rejects a frame.
pub fn write_gif(frames: &[GridFrame], path: &Path, fps: u32) -> Result<(), ConvertError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|source| ConvertError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
    }

    let file = File::create(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite)?;

    let frame_ms = 1000 / fps.max(1);
    for frame in frames {
        let delay = Delay::from_numer_denom_ms(frame_ms, 1);
        encoder.encode_frame(image::Frame::from_parts(frame_image(frame), 0, 0, delay))?;
    }
    Ok(())
}

/// Converts one pattern file into `<output_dir>/<stem>.gif`.
///
/// Returns the path of the written GIF.
///
/// # Errors
///
/// Any [`ConvertError`] from loading, rendering, or encoding.
pub fn convert_file(input: &Path, settings: &ConverterSettings) -> Result<PathBuf, ConvertError> {
    let pattern = load_pattern(input)?;
    let frames = render_frames(&pattern)?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("pattern");
    let output = Path::new(settings.output_dir()).join(format!("{stem}.gif"));

    write_gif(&frames, &output, settings.fps())?;
    debug!(
        input = %input.display(),
        output = %output.display(),
        frames = frames.len(),
        "converted pattern"
    );
    Ok(output)
}

/// One pixel per motor, gray level = amplitude.
fn frame_image(frame: &GridFrame) -> RgbaImage {
    let mut img = RgbaImage::new(GridFrame::width(), GridFrame::height());
    for (y, row) in frame.cells.iter().enumerate() {
        for (x, &amplitude) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Rgba([amplitude, amplitude, amplitude, 255]));
        }
    }
    img
}

// ── Tests ─────────────────────────────────────────────────────────────────────
