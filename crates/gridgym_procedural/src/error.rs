//! # Generation Error Types
//!
//! All the ways procedural generation can fail. Seed-driven inputs can
//! legitimately produce unsatisfiable levels, so these are ordinary values;
//! the environment retries with a derived seed instead of crashing.

use thiserror::Error;

/// Errors that can occur during level generation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenError {
    /// Grid dimensions the generator cannot work with.
    #[error("invalid generator dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// Object placement ran out of eligible free cells.
    #[error("no free cell left for object placement")]
    NoFreeCell,

    /// The grid contains no open room at all.
    #[error("no connected room found in grid")]
    NoRoomFound,

    /// The largest room is too small for the requested placements.
    #[error("largest room has {size} cells, need at least {need}")]
    RoomTooSmall {
        /// Cells in the best room.
        size: usize,
        /// Minimum cells required.
        need: usize,
    },

    /// Breadth-first search never reached the destination.
    #[error("no path from cell {src} to cell {dst}")]
    NoPathFound {
        /// Source cell index.
        src: usize,
        /// Destination cell index.
        dst: usize,
    },
}

impl GenError {
    /// Whether a fresh seed could plausibly avoid this failure.
    ///
    /// Dimension errors are configuration bugs and retrying cannot fix
    /// them; the rest depend on the random draw.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        !matches!(self, Self::InvalidDimensions { .. })
    }
}

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;
