//! The alpha-beta recursion in negamax form.
//!
//! Every returned score is from the perspective of the side to move at
//! that node; callers negate. Abort is a sentinel flag, never a panic:
//! when the stop signal trips, the current scores are garbage and every
//! frame above discards them.

use std::sync::atomic::{AtomicBool, Ordering};

use super::ordering::order_moves;
use super::{INFINITY_SCORE, MATE_SCORE, MATE_THRESHOLD};
use crate::board::Position;
use crate::eval::Evaluator;
use crate::tt::{Bound, TableEntry, TranspositionTable};

/// Check the stop flag every 1024 nodes.
const STOP_CHECK_MASK: u64 = 0x3FF;

pub(crate) struct SearchContext<'a> {
    pub(crate) position: &'a mut Position,
    pub(crate) evaluator: &'a dyn Evaluator,
    pub(crate) tt: &'a mut TranspositionTable,
    pub(crate) stop: &'a AtomicBool,
    pub(crate) nodes: u64,
    pub(crate) aborted: bool,
    pub(crate) generation: u8,
}

impl SearchContext<'_> {
    pub(crate) fn negamax(&mut self, depth: u32, mut alpha: i32, mut beta: i32, ply: u32) -> i32 {
        self.nodes += 1;
        if self.nodes & STOP_CHECK_MASK == 0 && self.stop.load(Ordering::Relaxed) {
            self.aborted = true;
        }
        if self.aborted {
            return 0;
        }

        if self.position.is_draw() || self.position.is_insufficient_material() {
            return 0;
        }

        let hash = self.position.hash();
        let alpha_original = alpha;

        if let Some(entry) = self.tt.probe(hash, depth) {
            let score = score_from_tt(entry.score, ply);
            match entry.bound {
                Bound::Exact => return score,
                Bound::Lower => alpha = alpha.max(score),
                Bound::Upper => beta = beta.min(score),
            }
            if alpha >= beta {
                return score;
            }
        }

        if depth == 0 {
            let raw = self.evaluator.evaluate(self.position);
            return if self.position.white_to_move() {
                raw
            } else {
                -raw
            };
        }

        let moves = self.position.generate_moves();
        if moves.is_empty() {
            // No legal moves: mate if the king is attacked, stalemate
            // otherwise. Mate scores carry distance from the root so a
            // nearer mate is preferred.
            let color = self.position.side_to_move();
            return if self.position.is_in_check(color) {
                -(MATE_SCORE - ply as i32)
            } else {
                0
            };
        }

        let tt_move = self.tt.entry_move(hash);
        let ordered = order_moves(self.position, &moves, tt_move);

        let mut best_score = -INFINITY_SCORE;
        let mut best_move = None;
        for m in ordered.iter() {
            self.position.make_move(m, false);
            let score = -self.negamax(depth - 1, -beta, -alpha, ply + 1);
            self.position.unmake_move();
            if self.aborted {
                return 0;
            }

            if score >= beta {
                // Beta cutoff: no sibling could ever be preferred over
                // this, so stop and record a lower bound.
                self.tt.insert(TableEntry {
                    key: hash,
                    depth,
                    score: score_to_tt(score, ply),
                    bound: Bound::Lower,
                    best_move: Some(m),
                    generation: self.generation,
                });
                return score;
            }
            if score > best_score {
                best_score = score;
                best_move = Some(m);
                if score > alpha {
                    alpha = score;
                }
            }
        }

        let bound = if best_score <= alpha_original {
            Bound::Upper
        } else {
            Bound::Exact
        };
        self.tt.insert(TableEntry {
            key: hash,
            depth,
            score: score_to_tt(best_score, ply),
            bound,
            best_move,
            generation: self.generation,
        });
        best_score
    }
}

/// Mate scores are stored relative to the cached node, not the root, so
/// an entry stays correct when probed from a different ply.
pub(crate) fn score_to_tt(score: i32, ply: u32) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

pub(crate) fn score_from_tt(score: i32, ply: u32) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}
