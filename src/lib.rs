//! Bit-packed chess core.
//!
//! The crate owns three tightly coupled pieces: the board state with
//! incremental make/unmake and a zobrist position hash, a rules-exact legal
//! move generator, and an iterative-deepening alpha-beta search over a
//! depth-aware transposition cache. Notation codecs, opening books, and
//! protocol loops live outside; they talk to the core through
//! [`PositionRecord`], [`Move`], and the [`Evaluator`] trait.
//!
//! # Example
//! ```
//! use lucena::{MaterialEvaluator, Position, SearchEngine};
//!
//! let mut position = Position::new();
//! let mut engine = SearchEngine::new(16);
//! let report = engine.find_best_move(&mut position, &MaterialEvaluator::default(), 4);
//! println!("best: {:?} score {}", report.best_move, report.score);
//! ```

pub mod board;
pub mod eval;
pub mod search;
pub mod tt;
pub mod zobrist;

pub use board::{
    Bitboard, CastlingRights, Color, Direction, Move, MoveKind, MoveList, Piece, Position,
    PositionBuilder, PositionRecord, RecordError, Square,
};
pub use eval::{EvalWeights, Evaluator, MaterialEvaluator};
pub use search::{IterationReport, SearchEngine, SearchReport, MATE_SCORE};
pub use tt::{Bound, TableEntry, TranspositionTable};
