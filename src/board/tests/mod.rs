//! Unit tests for the board core.

mod make_unmake;

use crate::board::{Bitboard, Color, Piece, Position, PositionRecord, Square};

/// Parse a FEN string into an import record. Notation handling is the
/// external driver's job in production; the tests stand in for that
/// driver so reference positions stay quotable.
pub(crate) fn record_from_fen(fen: &str) -> PositionRecord {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    assert!(parts.len() >= 4, "FEN needs at least 4 fields: {fen}");

    let mut pieces = [[Bitboard::EMPTY; 6]; 2];
    let mut rank = 7isize;
    let mut file = 0isize;
    for c in parts[0].chars() {
        match c {
            '/' => {
                rank -= 1;
                file = 0;
            }
            '1'..='8' => file += c as isize - '0' as isize,
            _ => {
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let piece = Piece::from_char(c).unwrap_or_else(|| panic!("bad piece '{c}'"));
                pieces[color.index()][piece.index()].0 |= 1u64 << (rank * 8 + file);
                file += 1;
            }
        }
    }

    let mut castling = [false; 4];
    for c in parts[2].chars() {
        match c {
            'K' => castling[0] = true,
            'Q' => castling[1] = true,
            'k' => castling[2] = true,
            'q' => castling[3] = true,
            _ => {}
        }
    }

    let en_passant = if parts[3] == "-" {
        Bitboard::EMPTY
    } else {
        parts[3].parse::<Square>().expect("en passant square").bit()
    };

    PositionRecord {
        pieces,
        white_to_move: parts[1] == "w",
        castling,
        en_passant,
        halfmove_clock: parts.get(4).and_then(|s| s.parse().ok()).unwrap_or(0),
        fullmove_number: parts.get(5).and_then(|s| s.parse().ok()).unwrap_or(1),
    }
}

pub(crate) fn position_from_fen(fen: &str) -> Position {
    let mut position = Position::new();
    position
        .set_position(&record_from_fen(fen))
        .expect("valid test position");
    position
}

/// Find the legal move matching coordinates, panicking when absent.
pub(crate) fn find_move(
    position: &mut Position,
    from: &str,
    to: &str,
    promotion: Option<Piece>,
) -> crate::board::Move {
    let from: Square = from.parse().unwrap();
    let to: Square = to.parse().unwrap();
    position
        .generate_moves()
        .find(from, to, promotion)
        .unwrap_or_else(|| panic!("expected legal move {from}{to}"))
}
