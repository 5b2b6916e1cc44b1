//! Class mask colorization and overlay compositing
//!
//! This module turns the backend's per-pixel facies labels into a
//! color-coded image and blends it over the original seismic line.

pub mod colorize;
pub mod overlay;

pub use colorize::{class_color, colorize, ClassMask};
pub use overlay::{overlay, overlay_with};
