//! Error types for position import.

use std::fmt;

/// Error type for invalid [`super::PositionRecord`] contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Two piece masks claim the same square.
    OverlappingPieces { square_index: usize },
    /// The en passant target has more than one bit set.
    MalformedEnPassant { mask: u64 },
    /// A side has no king, or more than one.
    BadKingCount { color_index: usize, count: u32 },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::OverlappingPieces { square_index } => {
                write!(f, "two pieces share square index {square_index}")
            }
            RecordError::MalformedEnPassant { mask } => {
                write!(f, "en passant target {mask:#x} is not a single square")
            }
            RecordError::BadKingCount { color_index, count } => {
                let color = if *color_index == 0 { "white" } else { "black" };
                write!(f, "{color} has {count} kings, expected exactly 1")
            }
        }
    }
}

impl std::error::Error for RecordError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = RecordError::OverlappingPieces { square_index: 28 };
        assert!(err.to_string().contains("28"));

        let err = RecordError::MalformedEnPassant { mask: 0x18 };
        assert!(err.to_string().contains("0x18"));

        let err = RecordError::BadKingCount {
            color_index: 1,
            count: 2,
        };
        assert!(err.to_string().contains("black"));
    }

    #[test]
    fn equality_and_clone() {
        let err = RecordError::MalformedEnPassant { mask: 3 };
        assert_eq!(err.clone(), err);
    }
}
