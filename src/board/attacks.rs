//! Attack queries over the current occupancy.
//!
//! Everything here reads the position without mutating it; move
//! generation, check detection, and castling validation are all built on
//! these primitives.

use super::bits::{lsb_index, msb_index, pop_count};
use super::tables::{Direction, KING_MOVES, KNIGHT_MOVES, PAWN_CAPTURES, RAYS};
use super::types::{Color, Piece, Square};
use super::Position;

impl Position {
    /// The occupied square nearest to `square` along `direction`, as a
    /// single-bit mask. Which end of the ray-occupancy intersection is
    /// "nearest" depends on whether the direction increases or decreases
    /// the square index.
    pub(crate) fn nearest_blocker(&self, square: usize, direction: Direction) -> Option<u64> {
        let ray = RAYS[square][direction.index()];
        let blockers = ray & self.all_occupied.0;
        if blockers == 0 {
            None
        } else if direction.index_increasing() {
            Some(1u64 << lsb_index(blockers))
        } else {
            Some(1u64 << msb_index(blockers))
        }
    }

    /// Destination mask for a sliding piece of `color` on `square`: every
    /// square strictly before the nearest blocker in each direction, plus
    /// the blocker square when it holds an enemy piece. Friendly blockers
    /// are masked off.
    pub(crate) fn sliding_attacks(&self, square: usize, piece: Piece, color: Color) -> u64 {
        debug_assert!(
            piece.attacks_straight() || piece.attacks_diagonally(),
            "{piece:?} is not a slider"
        );
        let directions: &[Direction] = match piece {
            Piece::Bishop => &Direction::DIAGONAL,
            Piece::Rook => &Direction::STRAIGHT,
            _ => &Direction::ALL,
        };
        let mut attacks = 0u64;
        for &direction in directions {
            let mut reach = RAYS[square][direction.index()];
            if let Some(blocker) = self.nearest_blocker(square, direction) {
                // Cut off everything beyond the blocker; the blocker
                // itself stays in and is filtered below if friendly.
                reach &= !RAYS[lsb_index(blocker)][direction.index()];
            }
            attacks |= reach;
        }
        attacks & !self.occupied[color.index()].0
    }

    /// Is `square` attacked by any piece of `by`?
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        let sq = square.as_index();
        let them = by.index();

        // A pawn of `by` attacks `square` exactly when a pawn of the
        // defending color on `square` would attack the pawn's square.
        let pawn_sources = PAWN_CAPTURES[by.opponent().index()][sq];
        if pawn_sources & self.pieces[them][Piece::Pawn.index()].0 != 0 {
            return true;
        }
        if KNIGHT_MOVES[sq] & self.pieces[them][Piece::Knight.index()].0 != 0 {
            return true;
        }
        if KING_MOVES[sq] & self.pieces[them][Piece::King.index()].0 != 0 {
            return true;
        }

        let straight = self.pieces[them][Piece::Rook.index()].0
            | self.pieces[them][Piece::Queen.index()].0;
        let diagonal = self.pieces[them][Piece::Bishop.index()].0
            | self.pieces[them][Piece::Queen.index()].0;
        for direction in Direction::ALL {
            if let Some(blocker) = self.nearest_blocker(sq, direction) {
                let sliders = if direction.is_straight() {
                    straight
                } else {
                    diagonal
                };
                if blocker & sliders != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Number of independent pieces of `by` attacking `square`. Two or
    /// more against a king is double check: blocking and capturing no
    /// longer help, only king moves do.
    #[must_use]
    pub fn attacker_count(&self, square: Square, by: Color) -> u32 {
        let sq = square.as_index();
        let them = by.index();
        let mut count = 0;

        let pawn_sources = PAWN_CAPTURES[by.opponent().index()][sq];
        count += pop_count(pawn_sources & self.pieces[them][Piece::Pawn.index()].0);
        count += pop_count(KNIGHT_MOVES[sq] & self.pieces[them][Piece::Knight.index()].0);
        count += pop_count(KING_MOVES[sq] & self.pieces[them][Piece::King.index()].0);

        let straight = self.pieces[them][Piece::Rook.index()].0
            | self.pieces[them][Piece::Queen.index()].0;
        let diagonal = self.pieces[them][Piece::Bishop.index()].0
            | self.pieces[them][Piece::Queen.index()].0;
        for direction in Direction::ALL {
            if let Some(blocker) = self.nearest_blocker(sq, direction) {
                let sliders = if direction.is_straight() {
                    straight
                } else {
                    diagonal
                };
                if blocker & sliders != 0 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Is this color's king currently attacked?
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }
}
