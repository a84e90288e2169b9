// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A buffer was asked for a zero-sized grid.
    #[error("invalid fog dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A cell outside the grid was touched. Upstream clamping should make this unreachable.
    #[error("cell ({x}, {y}) is outside the {width}x{height} fog buffer")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// Primary and mirror no longer share a size.
    #[error("fog buffer size mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch { expected: (u32, u32), found: (u32, u32) },

    #[error("invalid brush range: min {min}, max {max}")]
    InvalidBrushRange { min: f32, max: f32 },

    #[error("image load error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("window init error: {0}")]
    WindowInit(String),

    #[error("window update error: {0}")]
    WindowUpdate(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
