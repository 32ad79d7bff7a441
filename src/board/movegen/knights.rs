use super::super::bits::{bits, lsb_index};
use super::super::tables::KNIGHT_MOVES;
use super::super::types::{MoveList, Piece};
use super::super::Position;

impl Position {
    pub(crate) fn generate_knight_moves(&self, moves: &mut MoveList) {
        let color = self.side_to_move();
        for from_bit in bits(self.pieces[color.index()][Piece::Knight.index()].0) {
            let targets = KNIGHT_MOVES[lsb_index(from_bit)] & self.landable(color).0;
            self.push_relocations(from_bit, targets, Piece::Knight, color, moves);
        }
    }
}
