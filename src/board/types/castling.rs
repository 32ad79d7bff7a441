//! Castling rights type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const WHITE_KINGSIDE: u8 = 1 << 0;
const WHITE_QUEENSIDE: u8 = 1 << 1;
const BLACK_KINGSIDE: u8 = 1 << 2;
const BLACK_QUEENSIDE: u8 = 1 << 3;

const ALL_RIGHTS: u8 = WHITE_KINGSIDE | WHITE_QUEENSIDE | BLACK_KINGSIDE | BLACK_QUEENSIDE;

/// The four castling-rights flags as a bitmask.
///
/// Under normal play a cleared flag never comes back; only a full position
/// reset (`Position::new` / `set_position`) can re-establish rights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights.
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All four rights set.
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_RIGHTS)
    }

    /// Check a specific right.
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    /// Set a specific right.
    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Remove a specific right.
    #[inline]
    pub fn remove(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::bit_for(color, kingside);
    }

    /// Raw bitmask value (bit *i* corresponds to zobrist castling key *i*).
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Build from four individual flags (the import-record shape).
    #[must_use]
    pub fn from_flags(flags: [bool; 4]) -> Self {
        let mut rights = CastlingRights(0);
        for (i, &flag) in flags.iter().enumerate() {
            if flag {
                rights.0 |= 1 << i;
            }
        }
        rights
    }

    /// Export as four individual flags (the import-record shape).
    #[must_use]
    pub const fn to_flags(self) -> [bool; 4] {
        [
            self.0 & WHITE_KINGSIDE != 0,
            self.0 & WHITE_QUEENSIDE != 0,
            self.0 & BLACK_KINGSIDE != 0,
            self.0 & BLACK_QUEENSIDE != 0,
        ]
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => WHITE_KINGSIDE,
            (Color::White, false) => WHITE_QUEENSIDE,
            (Color::Black, true) => BLACK_KINGSIDE,
            (Color::Black, false) => BLACK_QUEENSIDE,
        }
    }
}
