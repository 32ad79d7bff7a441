//! Integration tests driving the public search API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lucena::{
    Color, MaterialEvaluator, Piece, Position, PositionBuilder, SearchEngine, Square,
};

fn kings_at(white: (usize, usize), black: (usize, usize)) -> PositionBuilder {
    PositionBuilder::new()
        .piece(Square(white.0, white.1), Color::White, Piece::King)
        .piece(Square(black.0, black.1), Color::Black, Piece::King)
}

#[test]
fn captures_a_hanging_queen() {
    // Black queen sits undefended on d5 in front of the white rook on d1.
    let mut position = kings_at((0, 6), (7, 6))
        .piece(Square(0, 3), Color::White, Piece::Rook)
        .piece(Square(4, 3), Color::Black, Piece::Queen)
        .piece(Square(6, 0), Color::Black, Piece::Pawn)
        .build()
        .unwrap();

    let mut engine = SearchEngine::new(8);
    let report = engine.find_best_move(&mut position, &MaterialEvaluator::default(), 4);

    let best = report.best_move.expect("a move exists");
    assert_eq!(best.to_string(), "d1d5");
    assert!(report.score > 500, "winning a queen should show: {}", report.score);
}

#[test]
fn root_ordering_improves_across_iterations() {
    let mut position = Position::new();
    let mut engine = SearchEngine::new(8);
    let report = engine.find_best_move(&mut position, &MaterialEvaluator::default(), 4);

    assert_eq!(report.iterations.len(), 4);
    // Depths are sequential, elapsed times are recorded, and every
    // iteration reports a real move.
    for (i, iteration) in report.iterations.iter().enumerate() {
        assert_eq!(iteration.depth, i as u32 + 1);
        let moves = position.generate_moves();
        assert!(moves
            .iter()
            .any(|m| *m == iteration.best_move), "iteration best move must be legal");
    }
}

#[test]
fn callback_fires_once_per_depth() {
    let calls = Arc::new(AtomicBool::new(false));
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

    let mut engine = SearchEngine::new(8);
    {
        let seen = Arc::clone(&seen);
        let calls = Arc::clone(&calls);
        engine.set_info_callback(Box::new(move |iteration| {
            calls.store(true, Ordering::Relaxed);
            seen.lock().unwrap().push(iteration.depth);
        }));
    }

    let mut position = Position::new();
    engine.find_best_move(&mut position, &MaterialEvaluator::default(), 3);

    assert!(calls.load(Ordering::Relaxed));
    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn stop_flag_cuts_the_search_short() {
    let mut position = Position::new();
    let mut engine = SearchEngine::new(8);
    let stop = AtomicBool::new(true);

    let report =
        engine.find_best_move_with_stop(&mut position, &MaterialEvaluator::default(), 8, &stop);

    // The abort is cooperative, so a little work happens before the flag
    // is noticed; a depth-8 startpos search would be orders of magnitude
    // bigger than this.
    assert!(report.nodes < 50_000, "stopped search still ran {} nodes", report.nodes);
    assert!(report.iterations.len() < 8);
    // The position comes back untouched either way.
    assert_eq!(position.made_moves(), 0);
}

#[test]
fn promotes_when_it_wins() {
    // White pawn on a7, kings far away: promotion is the obvious plan.
    let mut position = kings_at((0, 4), (7, 7))
        .piece(Square(6, 0), Color::White, Piece::Pawn)
        .build()
        .unwrap();

    let mut engine = SearchEngine::new(8);
    let report = engine.find_best_move(&mut position, &MaterialEvaluator::default(), 4);

    let best = report.best_move.unwrap();
    assert_eq!(best.promotion(), Some(Piece::Queen));
    assert_eq!(best.to_string(), "a7a8q");
}

#[test]
fn independent_engines_share_only_static_tables() {
    // Two engines on two threads, each with its own board and cache.
    let handles: Vec<_> = (0..2)
        .map(|_| {
            std::thread::spawn(|| {
                let mut position = Position::new();
                let mut engine = SearchEngine::new(4);
                let report =
                    engine.find_best_move(&mut position, &MaterialEvaluator::default(), 4);
                report.best_move.map(|m| m.to_string())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results[0].is_some());
    // Same inputs, fresh caches: both workers agree.
    assert_eq!(results[0], results[1]);
}
