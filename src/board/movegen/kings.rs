use super::super::bits::lsb_index;
use super::super::tables::{castle_index, CASTLES, KING_MOVES};
use super::super::types::{Bitboard, Move, MoveKind, MoveList, Piece};
use super::super::Position;

impl Position {
    pub(crate) fn generate_king_moves(&self, moves: &mut MoveList) {
        let color = self.side_to_move();
        let us = color.index();
        let from_bit = self.pieces[us][Piece::King.index()].0;
        let targets = KING_MOVES[lsb_index(from_bit)] & self.landable(color).0;
        self.push_relocations(from_bit, targets, Piece::King, color, moves);

        // Castling candidates: the right must still be set and the path
        // between king and rook empty. Attack checks on the king's transit
        // squares happen in the legality pass.
        for (kingside, kind) in [
            (true, MoveKind::CastleKingside),
            (false, MoveKind::CastleQueenside),
        ] {
            if !self.castling_rights.has(color, kingside) {
                continue;
            }
            let geometry = &CASTLES[castle_index(color, kingside)];
            if geometry.between & self.all_occupied.0 != 0 {
                continue;
            }
            // Guard against imported records whose rights outlived the
            // pieces they refer to.
            if from_bit != geometry.king_from
                || self.pieces[us][Piece::Rook.index()].0 & geometry.rook_from == 0
            {
                continue;
            }
            moves.push(Move::new(
                Bitboard(geometry.king_from),
                Bitboard(geometry.king_to),
                Piece::King,
                kind,
            ));
        }
    }
}
