//! Legal move generation.
//!
//! Three stages: pseudo-legal generation per piece kind, legality
//! filtering by making each candidate and testing whether the mover's own
//! king is attacked, and a castling-specific re-validation of the king's
//! transit squares. The make/check/unmake loop is the hot path; it runs
//! once per candidate per search node.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::bits::{bits, lsb_index};
use super::tables::{castle_index, CASTLES};
use super::types::{Bitboard, Color, Move, MoveKind, MoveList, Piece, Square};
use super::Position;

impl Position {
    /// All strictly legal moves for the side to move. Output order is
    /// unspecified; consumers impose their own ordering.
    pub fn generate_moves(&mut self) -> MoveList {
        let color = self.side_to_move();
        let opponent = color.opponent();
        let pseudo = self.generate_pseudo_moves();
        let mut legal = MoveList::new();

        for &m in pseudo.iter() {
            if m.is_castling() {
                // Castling is never an answer to check, and the king may
                // not cross or land on an attacked square.
                if self.is_in_check(color) {
                    continue;
                }
                let geometry =
                    &CASTLES[castle_index(color, m.kind == MoveKind::CastleKingside)];
                let mut path_attacked = false;
                for bit in bits(geometry.king_path) {
                    let sq = Square::from_index(lsb_index(bit));
                    if self.is_square_attacked(sq, opponent) {
                        path_attacked = true;
                        break;
                    }
                }
                if path_attacked {
                    continue;
                }
            }

            self.make_move(m, false);
            let leaves_king_exposed = self.is_in_check(color);
            self.unmake_move();
            if !leaves_king_exposed {
                legal.push(m);
            }
        }
        legal
    }

    fn generate_pseudo_moves(&self) -> MoveList {
        let color = self.side_to_move();
        let mut moves = MoveList::new();

        // In double check nothing but a king move can resolve the attack,
        // so skip generating the rest.
        if self.attacker_count(self.king_square(color), color.opponent()) >= 2 {
            self.generate_king_moves(&mut moves);
            return moves;
        }

        self.generate_pawn_moves(&mut moves);
        self.generate_knight_moves(&mut moves);
        self.generate_sliding_moves(Piece::Bishop, &mut moves);
        self.generate_sliding_moves(Piece::Rook, &mut moves);
        self.generate_sliding_moves(Piece::Queen, &mut moves);
        self.generate_king_moves(&mut moves);
        moves
    }

    /// True if the side to move has no legal moves and is in check.
    pub fn is_checkmate(&mut self) -> bool {
        let color = self.side_to_move();
        self.is_in_check(color) && self.generate_moves().is_empty()
    }

    /// True if the side to move has no legal moves but is not in check.
    pub fn is_stalemate(&mut self) -> bool {
        let color = self.side_to_move();
        !self.is_in_check(color) && self.generate_moves().is_empty()
    }

    /// Leaf count of the legal move tree to `depth`; the standard move
    /// generator correctness check against published reference counts.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for &m in moves.iter() {
            self.make_move(m, false);
            nodes += self.perft(depth - 1);
            self.unmake_move();
        }
        nodes
    }

    /// Tag helper shared by the pseudo-legal generators: plain relocation
    /// or capture, depending on the destination.
    pub(crate) fn relocation_kind(&self, to_bit: u64, color: Color) -> MoveKind {
        if self.occupied[color.opponent().index()].0 & to_bit != 0 {
            MoveKind::Capture
        } else {
            MoveKind::Quiet
        }
    }

    pub(crate) fn push_relocations(
        &self,
        from_bit: u64,
        targets: u64,
        piece: Piece,
        color: Color,
        moves: &mut MoveList,
    ) {
        for to_bit in bits(targets) {
            moves.push(Move::new(
                Bitboard(from_bit),
                Bitboard(to_bit),
                piece,
                self.relocation_kind(to_bit, color),
            ));
        }
    }
}
