//! Windowed extraction from raster models
//!
//! This module maps caller window requests onto the band buffers and
//! performs the optional nearest-neighbor resampling.

mod engine;
mod grid;
mod window;

// Public exports
pub use self::engine::ExtractOptions;
pub use self::grid::{ColorGrid, ValueGrid, WindowValues};
pub use self::window::{map_window, PixelWindow, Window};

pub(crate) use self::engine::extract_values;
