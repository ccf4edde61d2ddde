//! haptic-gif library crate.
//!
//! Batch converter from haptic pattern files to GIF animations: each pattern
//! iteration becomes one frame of a 4×6-pixel grayscale image, one pixel per
//! motor, gray level = amplitude. The point is a quick visual preview of a
//! pattern without strapping the hardware on.
//!
//! # Architecture
//!
//! ```text
//! [haptic-gif]
//!   ├── domain/          GridFrame (amplitude matrix), ConverterSettings
//!   ├── application/     Pattern → frames rendering (pure)
//!   └── infrastructure/  File reading and GIF encoding (image crate)
//! ```
//!
//! The converter is a standalone batch transform — it shares no state with
//! the backend client — but its knobs (frame rate, output directory) live in
//! the shared configuration document via [`domain::ConverterSettings`].

/// Domain layer: the frame grid and converter settings.
pub mod domain;

/// Application layer: pattern-to-frames rendering.
pub mod application;

/// Infrastructure layer: file I/O and GIF encoding.
pub mod infrastructure;

pub use application::render::render_frames;
pub use domain::grid::GridFrame;
pub use domain::settings::ConverterSettings;
pub use infrastructure::gif_writer::{convert_file, load_pattern, write_gif, ConvertError};
