//! Fog-of-war occlusion engine for tabletop maps.
//!
//! The GM paints into a primary [`OcclusionBuffer`]; a mirror copy for the
//! player display is refreshed only when a stroke ends. See
//! [`OcclusionController`] for the stroke and sync rules.

pub mod brush;
pub mod buffer;
pub mod cli;
pub mod compose;
pub mod config;
pub mod controller;
pub mod draw;
pub mod error;
pub mod gamma;
pub mod image_source;
pub mod mapping;
pub mod raster;
pub mod stroke;
pub mod types;

pub use brush::BrushSize;
pub use buffer::OcclusionBuffer;
pub use controller::OcclusionController;
pub use error::{Error, Result};
pub use mapping::MappingPolicy;
pub use stroke::StrokeMode;
pub use types::{DisplayRegion, FrameBuffer, Pointer};
