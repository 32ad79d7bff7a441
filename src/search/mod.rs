//! Iterative-deepening alpha-beta search.
//!
//! The engine owns the transposition cache and drives the recursion in
//! [`negamax`]: one full alpha-beta pass per depth, with the root move
//! order for each depth seeded by the previous depth's scores so the
//! likely-best move is searched first and produces early cutoffs.
//!
//! Cancellation is cooperative: an `AtomicBool` is checked at depth
//! boundaries and periodically inside the recursion, and an interrupted
//! depth is discarded so the report always reflects fully completed work.

mod negamax;
mod ordering;

use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use crate::board::{Move, Position, MAX_PLY};
use crate::eval::Evaluator;
use crate::tt::TranspositionTable;

/// Score for mate at the root; mate at ply n scores `MATE_SCORE - n`.
pub const MATE_SCORE: i32 = 30_000;
/// Scores at or above this magnitude denote a forced mate.
pub(crate) const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;
pub(crate) const INFINITY_SCORE: i32 = MATE_SCORE + 1;

/// What one completed deepening iteration found.
#[derive(Clone, Debug)]
pub struct IterationReport {
    pub depth: u32,
    /// Score from the searching side's perspective.
    pub score: i32,
    pub best_move: Move,
    /// Nodes visited during this iteration alone.
    pub nodes: u64,
    pub elapsed: Duration,
}

/// The final search result plus per-depth metadata.
#[derive(Clone, Debug)]
pub struct SearchReport {
    /// Best move of the deepest completed iteration; `None` when the side
    /// to move has no legal moves.
    pub best_move: Option<Move>,
    pub score: i32,
    /// Total nodes visited across all iterations.
    pub nodes: u64,
    pub iterations: Vec<IterationReport>,
}

/// Per-iteration reporting hook, so a driver can print protocol `info`
/// lines without the core knowing about protocols.
pub type SearchInfoCallback = Box<dyn Fn(&IterationReport) + Send>;

/// Iterative-deepening negamax driver over a transposition cache.
///
/// One engine serves one position at a time; independent engines with
/// independent caches may run concurrently, sharing only the immutable
/// lookup and key tables.
pub struct SearchEngine {
    tt: TranspositionTable,
    generation: u8,
    info_callback: Option<SearchInfoCallback>,
}

struct RootMove {
    mv: Move,
    score: i32,
}

impl SearchEngine {
    /// Create an engine with a transposition cache of about `tt_size_mb`
    /// megabytes.
    #[must_use]
    pub fn new(tt_size_mb: usize) -> Self {
        SearchEngine {
            tt: TranspositionTable::new(tt_size_mb),
            generation: 0,
            info_callback: None,
        }
    }

    /// Install a per-iteration reporting callback.
    pub fn set_info_callback(&mut self, callback: SearchInfoCallback) {
        self.info_callback = Some(callback);
    }

    /// Wipe the transposition cache. Results of repeated searches on the
    /// same position are only run-to-run identical after a clear; a warm
    /// cache legitimately changes move ordering, not correctness.
    pub fn clear_cache(&mut self) {
        self.tt.clear();
    }

    /// Search to `max_depth` plies and return the best move found plus
    /// per-depth metadata.
    pub fn find_best_move(
        &mut self,
        position: &mut Position,
        evaluator: &dyn Evaluator,
        max_depth: u32,
    ) -> SearchReport {
        let stop = AtomicBool::new(false);
        self.find_best_move_with_stop(position, evaluator, max_depth, &stop)
    }

    /// Like [`find_best_move`](Self::find_best_move), with cooperative
    /// cancellation: once `stop` is set, the in-flight depth is abandoned
    /// and the best fully-searched answer so far is returned.
    pub fn find_best_move_with_stop(
        &mut self,
        position: &mut Position,
        evaluator: &dyn Evaluator,
        max_depth: u32,
        stop: &AtomicBool,
    ) -> SearchReport {
        self.generation = self.generation.wrapping_add(1);

        let mut report = SearchReport {
            best_move: None,
            score: 0,
            nodes: 0,
            iterations: Vec::new(),
        };

        let legal = position.generate_moves();
        if legal.is_empty() {
            report.score = if position.is_in_check(position.side_to_move()) {
                -MATE_SCORE
            } else {
                0
            };
            return report;
        }

        // First-depth root order is plain MVV-LVA; later depths re-sort by
        // the scores the previous depth produced.
        let mut roots: Vec<RootMove> = ordering::order_moves(position, &legal, None)
            .iter()
            .map(|mv| RootMove { mv, score: 0 })
            .collect();

        let mut ctx = negamax::SearchContext {
            position,
            evaluator,
            tt: &mut self.tt,
            stop,
            nodes: 0,
            aborted: false,
            generation: self.generation,
        };

        for depth in 1..=max_depth {
            let started = Instant::now();
            let nodes_before = ctx.nodes;
            let mut alpha = -INFINITY_SCORE;
            let beta = INFINITY_SCORE;
            let mut best_this_depth: Option<Move> = None;

            for root in &mut roots {
                ctx.position.make_move(root.mv, false);
                let score = -ctx.negamax(depth - 1, -beta, -alpha, 1);
                ctx.position.unmake_move();
                if ctx.aborted {
                    break;
                }
                root.score = score;
                if best_this_depth.is_none() || score > alpha {
                    best_this_depth = Some(root.mv);
                }
                if score > alpha {
                    alpha = score;
                }
            }

            if ctx.aborted {
                break;
            }

            roots.sort_by(|a, b| b.score.cmp(&a.score));

            let best_move = best_this_depth.expect("nonempty root move list");
            let iteration = IterationReport {
                depth,
                score: alpha,
                best_move,
                nodes: ctx.nodes - nodes_before,
                elapsed: started.elapsed(),
            };
            #[cfg(feature = "logging")]
            log::debug!(
                "depth {} score {} best {} nodes {} in {:?}",
                iteration.depth,
                iteration.score,
                iteration.best_move,
                iteration.nodes,
                iteration.elapsed
            );
            if let Some(callback) = &self.info_callback {
                callback(&iteration);
            }

            report.best_move = Some(best_move);
            report.score = alpha;
            report.iterations.push(iteration);

            // A forced mate cannot improve with more depth.
            if alpha.abs() >= MATE_THRESHOLD {
                break;
            }
        }

        report.nodes = ctx.nodes;
        report
    }
}
