//! Make/unmake round trips and hash consistency.

use rand::prelude::*;

use super::{find_move, position_from_fen};
use crate::board::{Piece, Position};
use crate::zobrist;

#[test]
fn en_passant_make_unmake() {
    let mut board = position_from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let original = board.record();
    let original_hash = board.hash();

    let mv = find_move(&mut board, "e5", "f6", None);
    assert!(mv.is_en_passant());
    board.make_move(mv, false);
    // The captured pawn disappears from f5, not f6.
    assert!(board.piece_at("f5".parse().unwrap()).is_none());
    assert_eq!(board.hash(), zobrist::full_hash(&board));

    board.unmake_move();
    assert_eq!(board.record(), original);
    assert_eq!(board.hash(), original_hash);
}

#[test]
fn promotion_make_unmake() {
    let mut board = position_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let original_hash = board.hash();

    let mv = find_move(&mut board, "a7", "a8", Some(Piece::Queen));
    board.make_move(mv, false);
    assert_eq!(
        board.piece_at("a8".parse().unwrap()),
        Some((crate::board::Color::White, Piece::Queen))
    );
    assert_eq!(board.hash(), zobrist::full_hash(&board));

    board.unmake_move();
    assert_eq!(board.hash(), original_hash);
    assert_eq!(
        board.piece_at("a7".parse().unwrap()),
        Some((crate::board::Color::White, Piece::Pawn))
    );
}

#[test]
fn castling_make_unmake() {
    let mut board = position_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let original = board.record();
    let original_hash = board.hash();

    let mv = find_move(&mut board, "e1", "g1", None);
    assert!(mv.is_castling());
    board.make_move(mv, false);
    // King and rook moved, both white rights gone.
    assert_eq!(
        board.piece_at("g1".parse().unwrap()),
        Some((crate::board::Color::White, Piece::King))
    );
    assert_eq!(
        board.piece_at("f1".parse().unwrap()),
        Some((crate::board::Color::White, Piece::Rook))
    );
    assert!(!board.castling_rights().has(crate::board::Color::White, true));
    assert!(!board.castling_rights().has(crate::board::Color::White, false));
    assert!(board.castling_rights().has(crate::board::Color::Black, true));
    assert_eq!(board.hash(), zobrist::full_hash(&board));

    board.unmake_move();
    assert_eq!(board.record(), original);
    assert_eq!(board.hash(), original_hash);
}

#[test]
fn legal_moves_stable_after_make_unmake() {
    let mut board = Position::new();
    let initial_moves = board.generate_moves();
    let mut initial_list: Vec<String> = initial_moves.iter().map(ToString::to_string).collect();
    initial_list.sort();

    for &mv in initial_moves.iter() {
        board.make_move(mv, false);
        board.unmake_move();
    }

    let after_moves = board.generate_moves();
    let mut after_list: Vec<String> = after_moves.iter().map(ToString::to_string).collect();
    after_list.sort();
    assert_eq!(initial_list, after_list);
}

#[test]
fn hash_matches_recompute_after_random_moves() {
    let mut board = Position::new();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    for _ in 0..60 {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board.make_move(mv, false);
        assert_eq!(board.hash(), zobrist::full_hash(&board), "after {mv}");
    }

    while board.made_moves() > 0 {
        board.unmake_move();
        assert_eq!(board.hash(), zobrist::full_hash(&board));
    }
}

#[test]
fn random_playout_round_trips_every_field() {
    let mut board = Position::new();
    let initial = board.record();
    let initial_hash = board.hash();
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..200 {
        let moves = board.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board.make_move(mv, false);
    }

    while board.made_moves() > 0 {
        board.unmake_move();
    }

    assert_eq!(board.record(), initial);
    assert_eq!(board.hash(), initial_hash);
}

#[test]
fn transposing_sequences_hash_identically() {
    // 1.Nf3 d6 2.Nc3 and 1.Nc3 d6 2.Nf3 reach the same position.
    let mut a = Position::new();
    for (from, to) in [("g1", "f3"), ("d7", "d6"), ("b1", "c3")] {
        let mv = find_move(&mut a, from, to, None);
        a.make_move(mv, false);
    }

    let mut b = Position::new();
    for (from, to) in [("b1", "c3"), ("d7", "d6"), ("g1", "f3")] {
        let mv = find_move(&mut b, from, to, None);
        b.make_move(mv, false);
    }

    assert_eq!(a.hash(), b.hash());
    assert_eq!(a.record().pieces, b.record().pieces);
}

#[test]
fn double_push_sets_and_clears_en_passant() {
    let mut board = Position::new();
    let mv = find_move(&mut board, "e2", "e4", None);
    assert!(mv.is_double_pawn_push());
    board.make_move(mv, false);
    assert_eq!(
        board.en_passant_target(),
        "e3".parse::<crate::board::Square>().unwrap().bit()
    );

    // Any reply that is not an en passant capture clears the target.
    let reply = find_move(&mut board, "g8", "f6", None);
    board.make_move(reply, false);
    assert!(board.en_passant_target().is_empty());
}

#[test]
fn confirmed_moves_feed_the_game_log() {
    let mut board = Position::new();
    let e4 = find_move(&mut board, "e2", "e4", None);
    board.make_move(e4, true);
    assert_eq!(board.game_moves(), &[e4]);

    // Search-internal probes leave the log alone.
    let probe = find_move(&mut board, "e7", "e5", None);
    board.make_move(probe, false);
    assert_eq!(board.game_moves(), &[e4]);
    board.unmake_move();

    board.unmake_move();
    assert!(board.game_moves().is_empty());
}

#[test]
fn halfmove_clock_resets_on_pawn_moves_and_captures() {
    let mut board = Position::new();
    let nf3 = find_move(&mut board, "g1", "f3", None);
    board.make_move(nf3, false);
    assert_eq!(board.halfmove_clock(), 1);

    let d5 = find_move(&mut board, "d7", "d5", None);
    board.make_move(d5, false);
    assert_eq!(board.halfmove_clock(), 0);

    let nc3 = find_move(&mut board, "b1", "c3", None);
    board.make_move(nc3, false);
    assert_eq!(board.halfmove_clock(), 1);

    let d4 = find_move(&mut board, "d5", "d4", None);
    board.make_move(d4, false);
    assert_eq!(board.halfmove_clock(), 0);

    let capture = find_move(&mut board, "f3", "d4", None);
    assert!(capture.is_capture());
    board.make_move(capture, false);
    assert_eq!(board.halfmove_clock(), 0);
}

#[test]
fn fullmove_number_increments_after_black() {
    let mut board = Position::new();
    assert_eq!(board.fullmove_number(), 1);
    let e4 = find_move(&mut board, "e2", "e4", None);
    board.make_move(e4, false);
    assert_eq!(board.fullmove_number(), 1);
    let e5 = find_move(&mut board, "e7", "e5", None);
    board.make_move(e5, false);
    assert_eq!(board.fullmove_number(), 2);
}

#[test]
#[should_panic(expected = "unmake_move without a matching make_move")]
fn unmake_with_empty_history_panics() {
    let mut board = Position::new();
    board.unmake_move();
}
