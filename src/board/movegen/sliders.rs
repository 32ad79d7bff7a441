use super::super::bits::{bits, lsb_index};
use super::super::types::{MoveList, Piece};
use super::super::Position;

impl Position {
    pub(crate) fn generate_sliding_moves(&self, piece: Piece, moves: &mut MoveList) {
        let color = self.side_to_move();
        for from_bit in bits(self.pieces[color.index()][piece.index()].0) {
            let targets = self.sliding_attacks(lsb_index(from_bit), piece, color);
            self.push_relocations(from_bit, targets, piece, color, moves);
        }
    }
}
