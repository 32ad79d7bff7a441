//! Zobrist hashing for position identity.
//!
//! One independent random 64-bit key per (piece, color, square), per
//! castling-right flag, per en passant file, and one for the side to move.
//! Two move sequences reaching the same position XOR to the same hash,
//! which is what makes transposition-cache hits valid across move orders.
//!
//! Keys come from a fixed-seed [`StdRng`] behind a `Lazy`, so hashes are
//! reproducible across runs and initialization is idempotent: the table is
//! built exactly once, no matter how often it is touched.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, Piece, Position};

pub(crate) struct ZobristKeys {
    /// `piece_keys[piece][color][square]`
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) side_key: u64,
    /// Indexed like the `CastlingRights` bits: WK, WQ, BK, BQ.
    pub(crate) castling_keys: [u64; 4],
    /// Only the file of the en passant target matters.
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed for reproducibility.
        let mut rng = StdRng::seed_from_u64(0x5EED_CAFE_F00D_u64);
        let mut piece_keys = [[[0u64; 64]; 2]; 6];
        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let side_key = rng.gen();

        let mut castling_keys = [0u64; 4];
        for key in &mut castling_keys {
            *key = rng.gen();
        }

        let mut en_passant_keys = [0u64; 8];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            side_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

pub(crate) static KEYS: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

/// Hash a position from scratch: every occupied square, every active
/// castling right, the en passant file if a target is set, and the side
/// key when Black is to move.
///
/// The incremental updates inside `make_move` must always agree with this
/// function on the resulting position.
#[must_use]
pub fn full_hash(position: &Position) -> u64 {
    let keys = &*KEYS;
    let mut hash = 0u64;

    for color in Color::BOTH {
        for piece in Piece::ALL {
            let mask = position.piece_mask(color, piece).0;
            for bit in crate::board::bits::bits(mask) {
                let sq = crate::board::bits::lsb_index(bit);
                hash ^= keys.piece_keys[piece.index()][color.index()][sq];
            }
        }
    }

    let rights = position.castling_rights().as_u8();
    for (i, key) in keys.castling_keys.iter().enumerate() {
        if rights & (1 << i) != 0 {
            hash ^= key;
        }
    }

    let ep = position.en_passant_target().0;
    if ep != 0 {
        hash ^= keys.en_passant_keys[crate::board::bits::lsb_index(ep) % 8];
    }

    if !position.white_to_move() {
        hash ^= keys.side_key;
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialization_is_idempotent() {
        // Touching the table twice hands out the same values.
        let first = KEYS.piece_keys[0][0][0];
        let again = KEYS.piece_keys[0][0][0];
        assert_eq!(first, again);
        let first_side = KEYS.side_key;
        assert_eq!(first_side, KEYS.side_key);
    }

    #[test]
    fn keys_are_distinct() {
        // Not a cryptographic claim, just a sanity check against an RNG
        // wiring mistake handing out the same key everywhere.
        let keys = &*KEYS;
        assert_ne!(keys.piece_keys[0][0][0], keys.piece_keys[0][0][1]);
        assert_ne!(keys.piece_keys[0][0][0], keys.piece_keys[0][1][0]);
        assert_ne!(keys.castling_keys[0], keys.castling_keys[1]);
        assert_ne!(keys.en_passant_keys[0], keys.en_passant_keys[7]);
        assert_ne!(keys.side_key, 0);
    }

    #[test]
    fn full_hash_reflects_side_to_move() {
        let position = Position::new();
        let hash = full_hash(&position);
        assert_eq!(hash, position.hash());

        let mut flipped = position.record();
        flipped.white_to_move = false;
        let mut black_to_move = Position::new();
        black_to_move.set_position(&flipped).unwrap();
        assert_eq!(black_to_move.hash(), hash ^ KEYS.side_key);
    }
}
