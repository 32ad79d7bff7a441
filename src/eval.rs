//! Static evaluation seam.
//!
//! The search only requires [`Evaluator`]: centipawns from White's
//! perspective, sign-adjusted by the caller. The shipped
//! [`MaterialEvaluator`] scores material plus piece-square bonuses from an
//! explicit [`EvalWeights`] value; anything fancier lives outside the
//! crate behind the same trait.

use crate::board::bits::{bits, lsb_index, mirror_vertical};
use crate::board::{Color, Piece, Position};

/// A static position scorer. Scores are centipawns, positive when White
/// stands better. Implementations must be consistent: alpha-beta's
/// correctness depends on score ordering being meaningful, so the search
/// neither clamps nor sanity-checks what comes back.
pub trait Evaluator {
    fn evaluate(&self, position: &Position) -> i32;
}

/// Typed evaluation weights: a material value and a 64-entry
/// piece-square table per piece kind, written from White's perspective.
/// Black uses the same tables through a vertical mirror.
#[derive(Clone, Debug)]
pub struct EvalWeights {
    pub piece_values: [i32; 6],
    pub piece_squares: [[i32; 64]; 6],
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            // King material cancels out; its table still steers it.
            piece_values: [100, 320, 330, 500, 900, 0],
            piece_squares: [
                PAWN_TABLE,
                KNIGHT_TABLE,
                BISHOP_TABLE,
                ROOK_TABLE,
                QUEEN_TABLE,
                KING_TABLE,
            ],
        }
    }
}

/// Material plus piece-square evaluation over explicit weights.
#[derive(Clone, Debug, Default)]
pub struct MaterialEvaluator {
    weights: EvalWeights,
}

impl MaterialEvaluator {
    #[must_use]
    pub fn new(weights: EvalWeights) -> Self {
        MaterialEvaluator { weights }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, position: &Position) -> i32 {
        let mut score = 0;
        for piece in Piece::ALL {
            let p = piece.index();
            let value = self.weights.piece_values[p];
            let table = &self.weights.piece_squares[p];

            for bit in bits(position.piece_mask(Color::White, piece).0) {
                score += value + table[lsb_index(bit)];
            }
            // Mirroring the whole mask lets White's table serve Black.
            let mirrored = mirror_vertical(position.piece_mask(Color::Black, piece).0);
            for bit in bits(mirrored) {
                score -= value + table[lsb_index(bit)];
            }
        }
        score
    }
}

// Piece-square tables, rank 1 at the top of each listing.

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];
