use super::super::bits::{bits, lsb_index};
use super::super::tables::PAWN_CAPTURES;
use super::super::types::{Bitboard, Color, Move, MoveKind, MoveList, Piece, PROMOTION_PIECES};
use super::super::Position;

impl Position {
    pub(crate) fn generate_pawn_moves(&self, moves: &mut MoveList) {
        let color = self.side_to_move();
        let us = color.index();
        let them = color.opponent().index();
        let promotion_rank = color.pawn_promotion_rank();
        let start_rank = color.pawn_start_rank();

        for from_bit in bits(self.pieces[us][Piece::Pawn.index()].0) {
            let from_idx = lsb_index(from_bit);
            let from = Bitboard(from_bit);

            // Single push, expanding into promotions on the last rank; a
            // double push only from the start rank through an empty square.
            let push_bit = if color == Color::White {
                from_bit << 8
            } else {
                from_bit >> 8
            };
            if push_bit & self.empty.0 != 0 {
                let to = Bitboard(push_bit);
                if lsb_index(push_bit) / 8 == promotion_rank {
                    for promo in PROMOTION_PIECES {
                        moves.push(Move::new(from, to, Piece::Pawn, MoveKind::Promotion(promo)));
                    }
                } else {
                    moves.push(Move::new(from, to, Piece::Pawn, MoveKind::Quiet));
                    if from_idx / 8 == start_rank {
                        let double_bit = if color == Color::White {
                            push_bit << 8
                        } else {
                            push_bit >> 8
                        };
                        if double_bit & self.empty.0 != 0 {
                            moves.push(Move::new(
                                from,
                                Bitboard(double_bit),
                                Piece::Pawn,
                                MoveKind::DoublePawnPush,
                            ));
                        }
                    }
                }
            }

            // Diagonal captures, again expanding promotions.
            let captures = PAWN_CAPTURES[us][from_idx] & self.occupied[them].0;
            for to_bit in bits(captures) {
                let to = Bitboard(to_bit);
                if lsb_index(to_bit) / 8 == promotion_rank {
                    for promo in PROMOTION_PIECES {
                        moves.push(Move::new(
                            from,
                            to,
                            Piece::Pawn,
                            MoveKind::PromotionCapture(promo),
                        ));
                    }
                } else {
                    moves.push(Move::new(from, to, Piece::Pawn, MoveKind::Capture));
                }
            }

            // En passant: the capture mask meets the skipped square.
            let ep = PAWN_CAPTURES[us][from_idx] & self.en_passant.0;
            if ep != 0 {
                moves.push(Move::new(from, Bitboard(ep), Piece::Pawn, MoveKind::EnPassant));
            }
        }
    }
}
