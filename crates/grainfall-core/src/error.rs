use grainfall_simulation::{MaterialId, RegistryError};
use thiserror::Error;

/// Errors raised by the engine to its host. Material rules never see these.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid engine config: {0}")]
    Config(String),
    #[error("material id {id} is not registered")]
    UnknownMaterial { id: MaterialId },
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("snapshot is {found_width}x{found_height} but the grid is {width}x{height}")]
    SnapshotMismatch {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },
    #[error("failed to encode snapshot: {0}")]
    SnapshotEncode(String),
    #[error("failed to decode snapshot: {0}")]
    SnapshotDecode(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
