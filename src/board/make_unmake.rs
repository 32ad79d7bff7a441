//! In-place move application and undo.
//!
//! `make_move` pushes a full snapshot and then mutates the position,
//! folding every change into the hash incrementally; `unmake_move` pops
//! the snapshot and restores the previous state verbatim in O(1). The hash
//! deltas are computed from pre-mutation values, so ordering inside
//! `make_move` matters.

use super::bits::lsb_index;
use super::tables::{castle_index, CASTLES};
use super::types::{Bitboard, Color, Move, MoveKind, Piece};
use super::Position;
use crate::zobrist::KEYS;

impl Position {
    /// Apply a move. `confirmed` marks a real game move (recorded in the
    /// game-move log for external bookkeeping) as opposed to a
    /// search-internal probe; it never changes legality or hashing.
    pub fn make_move(&mut self, m: Move, confirmed: bool) {
        self.history.push(self.snapshot(confirmed));

        let keys = &*KEYS;
        let color = self.side_to_move();
        let us = color.index();
        let them = color.opponent().index();
        let from_idx = lsb_index(m.from.0);
        let to_idx = lsb_index(m.to.0);
        let mut hash = self.hash;

        // Side parity and the old en passant file leave the hash before
        // any state is overwritten.
        hash ^= keys.side_key;
        if self.en_passant.0 != 0 {
            hash ^= keys.en_passant_keys[lsb_index(self.en_passant.0) % 8];
        }

        // Remove whatever the move captures, before touching the mover.
        let mut captured: Option<(Color, Piece)> = None;
        match m.kind {
            MoveKind::EnPassant => {
                // The captured pawn sits behind the destination square,
                // not on it.
                let captured_bit = if color == Color::White {
                    m.to.0 >> 8
                } else {
                    m.to.0 << 8
                };
                self.pieces[them][Piece::Pawn.index()].0 &= !captured_bit;
                hash ^= keys.piece_keys[Piece::Pawn.index()][them][lsb_index(captured_bit)];
                captured = Some((color.opponent(), Piece::Pawn));
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {}
            _ => {
                if let Some((cap_color, cap_piece)) = self.piece_at(m.to_square()) {
                    hash ^= keys.piece_keys[cap_piece.index()][cap_color.index()][to_idx];
                    captured = Some((cap_color, cap_piece));
                }
                // Clearing the destination across every mask removes the
                // occupant generically, whatever it was.
                for color_masks in &mut self.pieces {
                    for mask in color_masks.iter_mut() {
                        mask.0 &= !m.to.0;
                    }
                }
            }
        }

        // Move the piece; promotions place the promoted kind instead.
        hash ^= keys.piece_keys[m.piece.index()][us][from_idx];
        self.pieces[us][m.piece.index()].0 &= !m.from.0;
        let placed = match m.kind {
            MoveKind::Promotion(p) | MoveKind::PromotionCapture(p) => p,
            _ => m.piece,
        };
        self.pieces[us][placed.index()].0 |= m.to.0;
        hash ^= keys.piece_keys[placed.index()][us][to_idx];

        // Castling also relocates the rook.
        if m.is_castling() {
            let geometry = &CASTLES[castle_index(color, m.kind == MoveKind::CastleKingside)];
            self.pieces[us][Piece::Rook.index()].0 &= !geometry.rook_from;
            self.pieces[us][Piece::Rook.index()].0 |= geometry.rook_to;
            hash ^= keys.piece_keys[Piece::Rook.index()][us][lsb_index(geometry.rook_from)];
            hash ^= keys.piece_keys[Piece::Rook.index()][us][lsb_index(geometry.rook_to)];
        }

        // Rights go away the first time a king or rook leaves its original
        // square, or an original rook square is captured into. Each flag
        // that flips XORs its key exactly once.
        let rights_before = self.castling_rights;
        if m.piece == Piece::King {
            self.castling_rights.remove(color, true);
            self.castling_rights.remove(color, false);
        } else if m.piece == Piece::Rook {
            for kingside in [true, false] {
                if m.from.0 == CASTLES[castle_index(color, kingside)].rook_from {
                    self.castling_rights.remove(color, kingside);
                }
            }
        }
        if matches!(captured, Some((_, Piece::Rook))) {
            let opponent = color.opponent();
            for kingside in [true, false] {
                if m.to.0 == CASTLES[castle_index(opponent, kingside)].rook_from {
                    self.castling_rights.remove(opponent, kingside);
                }
            }
        }
        let cleared = rights_before.as_u8() & !self.castling_rights.as_u8();
        for (i, key) in keys.castling_keys.iter().enumerate() {
            if cleared & (1 << i) != 0 {
                hash ^= key;
            }
        }

        // A target exists only on the move right after a double push.
        self.en_passant = Bitboard::EMPTY;
        if m.kind == MoveKind::DoublePawnPush {
            let skipped = if color == Color::White {
                m.from.0 << 8
            } else {
                m.from.0 >> 8
            };
            self.en_passant = Bitboard(skipped);
            hash ^= keys.en_passant_keys[lsb_index(skipped) % 8];
        }

        // The halfmove clock restarts whenever the fifty-move rule does;
        // the fullmove number ticks after Black's move.
        if m.piece == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if !self.white_to_move {
            self.fullmove_number += 1;
        }

        self.white_to_move = !self.white_to_move;
        self.hash = hash;
        self.update_aggregates();

        if confirmed {
            self.game_moves.push(m);
        }
    }

    /// Undo the most recent made move by restoring its snapshot verbatim.
    ///
    /// # Panics
    /// Panics when no move has been made: a make/undo mismatch would
    /// silently corrupt the board, so it fails fast instead.
    pub fn unmake_move(&mut self) {
        let snapshot = self
            .history
            .pop()
            .expect("unmake_move without a matching make_move");
        if snapshot.confirmed {
            self.game_moves.pop();
        }
        self.pieces = snapshot.pieces;
        self.occupied = snapshot.occupied;
        self.all_occupied = snapshot.all_occupied;
        self.empty = snapshot.empty;
        self.white_or_empty = snapshot.white_or_empty;
        self.black_or_empty = snapshot.black_or_empty;
        self.white_to_move = snapshot.white_to_move;
        self.castling_rights = snapshot.castling_rights;
        self.en_passant = snapshot.en_passant;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;
        self.hash = snapshot.hash;
    }
}
