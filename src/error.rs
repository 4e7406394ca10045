use thiserror::Error;

use crate::puzzle::TileId;

#[derive(Error, Debug)]
pub enum PuzzleError {
    // Tile directory errors
    #[error("Tile {id} is already tracked")]
    DuplicateId { id: TileId },

    #[error("Tile {id} is not pending")]
    NotFound { id: TileId },

    // Resolver errors
    #[error("Tile {id} has a zero-length or non-finite step")]
    DegenerateDirection { id: TileId },

    #[error("Tile {id} does not start inside the area")]
    OutsideArea { id: TileId },

    // Packer errors
    #[error("Could not place entity of kind '{kind}' after placing {placed} entities")]
    PackingInfeasible { kind: String, placed: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Settings file errors
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for all operations
pub type PuzzleResult<T> = Result<T, PuzzleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puzzle_error_display() {
        let err = PuzzleError::DuplicateId { id: TileId(7) };
        assert_eq!(err.to_string(), "Tile #7 is already tracked");

        let err = PuzzleError::PackingInfeasible {
            kind: "large-x".into(),
            placed: 4,
        };
        assert!(err.to_string().contains("large-x"));
    }
}
