//! The mutable board position.
//!
//! One `Position` is exclusively owned by one search at a time; make/unmake
//! mutate it in place against an internal snapshot stack, so nothing is
//! copied per search node.

use super::bits::{lsb_index, pop_count};
use super::types::{Bitboard, CastlingRights, Color, Move, Piece, Square};
use super::{PositionRecord, RecordError};
use crate::zobrist;

/// Everything mutable about a position, captured before a move so that
/// unmake can restore it verbatim.
#[derive(Clone, Debug)]
pub(crate) struct Snapshot {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) empty: Bitboard,
    pub(crate) white_or_empty: Bitboard,
    pub(crate) black_or_empty: Bitboard,
    pub(crate) white_to_move: bool,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Bitboard,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    /// Whether the move that pushed this snapshot was a confirmed game
    /// move (as opposed to a search-internal probe).
    pub(crate) confirmed: bool,
}

/// A chess position: twelve piece masks, derived occupancy aggregates,
/// side to move, castling rights, en passant target, move counters, the
/// incrementally maintained zobrist hash, and the undo history.
#[derive(Clone, Debug)]
pub struct Position {
    /// Piece masks indexed by `[color][piece]`. At most one mask has any
    /// given bit set.
    pub(crate) pieces: [[Bitboard; 6]; 2],
    // Derived aggregates, recomputed wholesale after every mutation.
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) empty: Bitboard,
    pub(crate) white_or_empty: Bitboard,
    pub(crate) black_or_empty: Bitboard,

    pub(crate) white_to_move: bool,
    pub(crate) castling_rights: CastlingRights,
    /// Zero, or exactly one bit: the square a pawn just skipped.
    pub(crate) en_passant: Bitboard,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,

    pub(crate) history: Vec<Snapshot>,
    /// Confirmed game moves, in order (the external bookkeeping hook).
    pub(crate) game_moves: Vec<Move>,
}

impl Position {
    /// The standard starting position with a fresh hash and empty history.
    #[must_use]
    pub fn new() -> Self {
        let mut position = Position::empty_board();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            position.set_piece(Square(0, file), Color::White, piece);
            position.set_piece(Square(7, file), Color::Black, piece);
            position.set_piece(Square(1, file), Color::White, Piece::Pawn);
            position.set_piece(Square(6, file), Color::Black, Piece::Pawn);
        }
        position.castling_rights = CastlingRights::all();
        position.update_aggregates();
        position.hash = zobrist::full_hash(&position);
        position
    }

    fn empty_board() -> Self {
        Position {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            empty: Bitboard::ALL,
            white_or_empty: Bitboard::ALL,
            black_or_empty: Bitboard::ALL,
            white_to_move: true,
            castling_rights: CastlingRights::none(),
            en_passant: Bitboard::EMPTY,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            history: Vec::new(),
            game_moves: Vec::new(),
        }
    }

    /// Replace every mutable field from an imported record, recompute the
    /// hash from scratch, and clear the history (there is no undo across an
    /// externally imposed position change).
    pub fn set_position(&mut self, record: &PositionRecord) -> Result<(), RecordError> {
        validate_record(record)?;

        self.pieces = record.pieces;
        self.white_to_move = record.white_to_move;
        self.castling_rights = CastlingRights::from_flags(record.castling);
        self.en_passant = record.en_passant;
        self.halfmove_clock = record.halfmove_clock;
        self.fullmove_number = record.fullmove_number;
        self.history.clear();
        self.game_moves.clear();
        self.update_aggregates();
        self.hash = zobrist::full_hash(self);
        Ok(())
    }

    /// Export the current position as an import record (read-only
    /// snapshot for external rendering).
    #[must_use]
    pub fn record(&self) -> PositionRecord {
        PositionRecord {
            pieces: self.pieces,
            white_to_move: self.white_to_move,
            castling: self.castling_rights.to_flags(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// The position-identity hash. Always equal to hashing the position
    /// from scratch; maintained incrementally by make/unmake.
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// The side to move.
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Zero, or the single-bit mask of the en passant target square.
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Bitboard {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The mask of one piece kind for one color.
    #[inline]
    #[must_use]
    pub fn piece_mask(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// All squares occupied by one color.
    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// All occupied squares.
    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.all_occupied
    }

    /// Number of made-but-not-undone moves.
    #[inline]
    #[must_use]
    pub fn made_moves(&self) -> usize {
        self.history.len()
    }

    /// Confirmed game moves, in the order they were made.
    #[must_use]
    pub fn game_moves(&self) -> &[Move] {
        &self.game_moves
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.pieces[color.index()][piece.index()].0 |= sq.bit().0;
    }

    /// What occupies a square, if anything.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let bit = sq.bit().0;
        if self.all_occupied.0 & bit == 0 {
            return None;
        }
        let color = if self.occupied[0].0 & bit != 0 {
            Color::White
        } else {
            Color::Black
        };
        for piece in Piece::ALL {
            if self.pieces[color.index()][piece.index()].0 & bit != 0 {
                return Some((color, piece));
            }
        }
        None
    }

    /// Recompute every derived aggregate mask from the twelve piece masks.
    /// Derived masks are never edited directly.
    pub(crate) fn update_aggregates(&mut self) {
        for c in 0..2 {
            let mut mask = 0u64;
            for p in 0..6 {
                mask |= self.pieces[c][p].0;
            }
            self.occupied[c] = Bitboard(mask);
        }
        self.all_occupied = Bitboard(self.occupied[0].0 | self.occupied[1].0);
        self.empty = Bitboard(!self.all_occupied.0);
        self.white_or_empty = Bitboard(self.occupied[0].0 | self.empty.0);
        self.black_or_empty = Bitboard(self.occupied[1].0 | self.empty.0);
    }

    /// Squares a piece of `color` may land on: enemy-occupied or empty.
    #[inline]
    pub(crate) fn landable(&self, color: Color) -> Bitboard {
        match color {
            Color::White => self.black_or_empty,
            Color::Black => self.white_or_empty,
        }
    }

    pub(crate) fn snapshot(&self, confirmed: bool) -> Snapshot {
        Snapshot {
            pieces: self.pieces,
            occupied: self.occupied,
            all_occupied: self.all_occupied,
            empty: self.empty,
            white_or_empty: self.white_or_empty,
            black_or_empty: self.black_or_empty,
            white_to_move: self.white_to_move,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            hash: self.hash,
            confirmed,
        }
    }

    /// How many earlier positions in the live history share the current
    /// hash. Only positions since the last pawn move or capture can
    /// repeat, so the scan is bounded by the halfmove clock.
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        let mut count = 0;
        for snap in self.history.iter().rev().take(self.halfmove_clock as usize) {
            if snap.hash == self.hash {
                count += 1;
            }
        }
        count
    }

    /// Fifty-move rule or threefold repetition.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        if self.halfmove_clock >= 100 {
            return true;
        }
        self.repetition_count() >= 2
    }

    /// Neither side retains enough material to mate: bare kings, a single
    /// minor piece, or only same-colored bishops.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let white = Color::White.index();
        let black = Color::Black.index();

        let majors_or_pawns = self.pieces[white][Piece::Pawn.index()].0
            | self.pieces[black][Piece::Pawn.index()].0
            | self.pieces[white][Piece::Rook.index()].0
            | self.pieces[black][Piece::Rook.index()].0
            | self.pieces[white][Piece::Queen.index()].0
            | self.pieces[black][Piece::Queen.index()].0;
        if majors_or_pawns != 0 {
            return false;
        }

        let knights = self.pieces[white][Piece::Knight.index()].0
            | self.pieces[black][Piece::Knight.index()].0;
        let bishops = self.pieces[white][Piece::Bishop.index()].0
            | self.pieces[black][Piece::Bishop.index()].0;
        let minors = pop_count(knights) + pop_count(bishops);

        if minors <= 1 {
            return true;
        }
        if knights == 0 {
            return bishops & Bitboard::LIGHT_SQUARES.0 == 0
                || bishops & Bitboard::DARK_SQUARES.0 == 0;
        }
        false
    }

    /// The king square for a color. Exactly one king per side is a board
    /// invariant enforced at import.
    #[inline]
    #[must_use]
    pub(crate) fn king_square(&self, color: Color) -> Square {
        let mask = self.pieces[color.index()][Piece::King.index()].0;
        debug_assert!(mask != 0, "{color} has no king");
        Square::from_index(lsb_index(mask))
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

fn validate_record(record: &PositionRecord) -> Result<(), RecordError> {
    let mut union = 0u64;
    let mut total_bits = 0u32;
    for color_masks in &record.pieces {
        for mask in color_masks {
            union |= mask.0;
            total_bits += pop_count(mask.0);
        }
    }
    if total_bits != pop_count(union) {
        // Some square is claimed twice; report the lowest such square.
        let mut seen = 0u64;
        for color_masks in &record.pieces {
            for mask in color_masks {
                let clash = seen & mask.0;
                if clash != 0 {
                    return Err(RecordError::OverlappingPieces {
                        square_index: lsb_index(clash),
                    });
                }
                seen |= mask.0;
            }
        }
    }

    if record.en_passant.0 != 0 && !record.en_passant.is_single() {
        return Err(RecordError::MalformedEnPassant {
            mask: record.en_passant.0,
        });
    }

    for (color_index, color_masks) in record.pieces.iter().enumerate() {
        let kings = pop_count(color_masks[Piece::King.index()].0);
        if kings != 1 {
            return Err(RecordError::BadKingCount { color_index, count: kings });
        }
    }

    Ok(())
}
