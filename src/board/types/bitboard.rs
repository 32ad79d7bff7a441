//! Bitboard type and operations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::square::Square;

/// A 64-bit mask where bit *i* represents square *i* of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);

    /// Light squares (b1, d1, ..., a2, c2, ...).
    pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55AA_55AA_55AA_55AA);
    /// Dark squares (a1, c1, ..., b2, d2, ...).
    pub const DARK_SQUARES: Bitboard = Bitboard(0xAA55_AA55_AA55_AA55);

    /// Create a bitboard with a single square set.
    #[inline]
    #[must_use]
    pub const fn from_square(sq: Square) -> Self {
        sq.bit()
    }

    /// Get the file mask for a given file index (0-7).
    #[inline]
    #[must_use]
    pub const fn file_mask(file: usize) -> Self {
        Bitboard(Self::FILE_A.0 << file)
    }

    /// Get the rank mask for a given rank index (0-7).
    #[inline]
    #[must_use]
    pub const fn rank_mask(rank: usize) -> Self {
        Bitboard(Self::RANK_1.0 << (rank * 8))
    }

    /// Returns true if no bit is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if exactly one bit is set.
    #[inline]
    #[must_use]
    pub const fn is_single(self) -> bool {
        self.0.is_power_of_two()
    }

    /// Returns true if the given square is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & sq.bit().0 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_and_rank_masks() {
        assert_eq!(Bitboard::file_mask(0), Bitboard::FILE_A);
        assert_eq!(Bitboard::file_mask(7), Bitboard::FILE_H);
        assert_eq!(Bitboard::rank_mask(0), Bitboard::RANK_1);
        assert_eq!(Bitboard::rank_mask(7), Bitboard::RANK_8);
        assert_eq!(
            Bitboard::LIGHT_SQUARES.0 | Bitboard::DARK_SQUARES.0,
            Bitboard::ALL.0
        );
    }

    #[test]
    fn single_bit_checks() {
        assert!(Bitboard(0x80).is_single());
        assert!(!Bitboard(0x81).is_single());
        assert!(!Bitboard::EMPTY.is_single());
        assert!(Bitboard::RANK_1.contains(Square(0, 3)));
        assert!(!Bitboard::RANK_1.contains(Square(1, 3)));
    }
}
