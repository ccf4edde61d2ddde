//! Infrastructure layer for haptic-gif.
//!
//! File reading and GIF encoding. The `image` crate only appears here.

pub mod gif_writer;

pub use gif_writer::{convert_file, load_pattern, write_gif, ConvertError};
