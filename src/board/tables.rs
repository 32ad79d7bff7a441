//! Process-wide lookup tables, computed once at first use.
//!
//! All tables are behind `Lazy` statics: construction is idempotent and the
//! data is read-only afterwards, so independent searches on separate
//! threads can share them freely.

use once_cell::sync::Lazy;

use super::types::Color;

/// One of the eight ray directions on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All eight directions (queen movement).
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Rook directions.
    pub const STRAIGHT: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Bishop directions.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 1,
            Direction::East => 2,
            Direction::SouthEast => 3,
            Direction::South => 4,
            Direction::SouthWest => 5,
            Direction::West => 6,
            Direction::NorthWest => 7,
        }
    }

    /// (rank, file) step for this direction.
    #[inline]
    const fn step(self) -> (isize, isize) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }

    /// Whether travel in this direction increases the square index. Decides
    /// which end of a ray-occupancy intersection is nearest to the origin.
    #[inline]
    #[must_use]
    pub(crate) const fn index_increasing(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }

    /// Whether this is a rank/file direction (rook-like rather than
    /// bishop-like).
    #[inline]
    #[must_use]
    pub(crate) const fn is_straight(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }
}

fn on_board(rank: isize, file: isize) -> bool {
    (0..8).contains(&rank) && (0..8).contains(&file)
}

fn bit_at(rank: isize, file: isize) -> u64 {
    1u64 << (rank * 8 + file)
}

/// Full ray masks per square and direction: every square strictly beyond
/// the origin, out to the board edge.
pub(crate) static RAYS: Lazy<[[u64; 8]; 64]> = Lazy::new(|| {
    let mut rays = [[0u64; 8]; 64];
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        for dir in Direction::ALL {
            let (dr, df) = dir.step();
            let mut mask = 0u64;
            let mut r = rank + dr;
            let mut f = file + df;
            while on_board(r, f) {
                mask |= bit_at(r, f);
                r += dr;
                f += df;
            }
            rays[sq][dir.index()] = mask;
        }
    }
    rays
});

/// Knight destination masks per square.
pub(crate) static KNIGHT_MOVES: Lazy<[u64; 64]> = Lazy::new(|| {
    const JUMPS: [(isize, isize); 8] = [
        (2, 1),
        (2, -1),
        (-2, 1),
        (-2, -1),
        (1, 2),
        (1, -2),
        (-1, 2),
        (-1, -2),
    ];
    let mut moves = [0u64; 64];
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        let mut mask = 0u64;
        for (dr, df) in JUMPS {
            if on_board(rank + dr, file + df) {
                mask |= bit_at(rank + dr, file + df);
            }
        }
        moves[sq] = mask;
    }
    moves
});

/// King destination masks per square.
pub(crate) static KING_MOVES: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut moves = [0u64; 64];
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        let mut mask = 0u64;
        for dir in Direction::ALL {
            let (dr, df) = dir.step();
            if on_board(rank + dr, file + df) {
                mask |= bit_at(rank + dr, file + df);
            }
        }
        moves[sq] = mask;
    }
    moves
});

/// Pawn capture masks per color and square (the two diagonally-forward
/// squares; one on the edge files).
pub(crate) static PAWN_CAPTURES: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut captures = [[0u64; 64]; 2];
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        for (c, forward) in [(0, 1isize), (1, -1isize)] {
            let mut mask = 0u64;
            for df in [-1isize, 1] {
                if on_board(rank + forward, file + df) {
                    mask |= bit_at(rank + forward, file + df);
                }
            }
            captures[c][sq] = mask;
        }
    }
    captures
});

/// Geometry of one castling move: where the king and rook start and land,
/// which squares must be empty, and which squares the king transits (start
/// and landing included; squares only the rook crosses are not).
pub(crate) struct CastleGeometry {
    pub(crate) king_from: u64,
    pub(crate) king_to: u64,
    pub(crate) rook_from: u64,
    pub(crate) rook_to: u64,
    /// Squares between king and rook that must be empty.
    pub(crate) between: u64,
    /// Squares that must not be attacked by the opponent.
    pub(crate) king_path: u64,
}

fn castle_geometry(back_rank: usize, kingside: bool) -> CastleGeometry {
    let rank = back_rank as isize;
    let (king_to_file, rook_from_file, rook_to_file) = if kingside {
        (6isize, 7isize, 5isize)
    } else {
        (2, 0, 3)
    };
    let king_from_file = 4isize;

    let mut between = 0u64;
    let (lo, hi) = if rook_from_file < king_from_file {
        (rook_from_file, king_from_file)
    } else {
        (king_from_file, rook_from_file)
    };
    for f in (lo + 1)..hi {
        between |= bit_at(rank, f);
    }

    let mut king_path = 0u64;
    let (lo, hi) = if king_to_file < king_from_file {
        (king_to_file, king_from_file)
    } else {
        (king_from_file, king_to_file)
    };
    for f in lo..=hi {
        king_path |= bit_at(rank, f);
    }

    CastleGeometry {
        king_from: bit_at(rank, king_from_file),
        king_to: bit_at(rank, king_to_file),
        rook_from: bit_at(rank, rook_from_file),
        rook_to: bit_at(rank, rook_to_file),
        between,
        king_path,
    }
}

/// The four castling moves, indexed by [`castle_index`] (and matching the
/// `CastlingRights` bit order and the zobrist castling keys).
pub(crate) static CASTLES: Lazy<[CastleGeometry; 4]> = Lazy::new(|| {
    [
        castle_geometry(0, true),
        castle_geometry(0, false),
        castle_geometry(7, true),
        castle_geometry(7, false),
    ]
});

#[inline]
pub(crate) const fn castle_index(color: Color, kingside: bool) -> usize {
    (color.index() << 1) | if kingside { 0 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::Square;

    fn sq(notation: &str) -> usize {
        notation.parse::<Square>().unwrap().as_index()
    }

    #[test]
    fn rays_run_to_the_edge() {
        // North from e4: e5, e6, e7, e8
        let north = RAYS[sq("e4")][Direction::North.index()];
        let expected = [sq("e5"), sq("e6"), sq("e7"), sq("e8")]
            .iter()
            .fold(0u64, |m, &s| m | (1 << s));
        assert_eq!(north, expected);

        // Corner squares have empty rays outward
        assert_eq!(RAYS[sq("a1")][Direction::South.index()], 0);
        assert_eq!(RAYS[sq("a1")][Direction::West.index()], 0);
        assert_eq!(RAYS[sq("h8")][Direction::NorthEast.index()], 0);

        // Long diagonal from a1
        let diag = RAYS[sq("a1")][Direction::NorthEast.index()];
        assert_eq!(crate::board::bits::pop_count(diag), 7);
        assert!(diag & (1 << sq("h8")) != 0);
    }

    #[test]
    fn rays_exclude_origin() {
        for square in 0..64 {
            for dir in Direction::ALL {
                assert_eq!(RAYS[square][dir.index()] & (1 << square), 0);
            }
        }
    }

    #[test]
    fn knight_masks() {
        let c3 = KNIGHT_MOVES[sq("c3")];
        for target in ["a2", "a4", "b1", "b5", "d1", "d5", "e2", "e4"] {
            assert!(c3 & (1 << sq(target)) != 0, "missing {target}");
        }
        assert_eq!(crate::board::bits::pop_count(c3), 8);
        assert_eq!(crate::board::bits::pop_count(KNIGHT_MOVES[sq("a1")]), 2);
    }

    #[test]
    fn king_masks() {
        assert_eq!(crate::board::bits::pop_count(KING_MOVES[sq("e4")]), 8);
        assert_eq!(crate::board::bits::pop_count(KING_MOVES[sq("a1")]), 3);
        assert_eq!(crate::board::bits::pop_count(KING_MOVES[sq("h4")]), 5);
    }

    #[test]
    fn pawn_capture_masks() {
        let white_e4 = PAWN_CAPTURES[0][sq("e4")];
        assert_eq!(white_e4, (1 << sq("d5")) | (1 << sq("f5")));
        let black_e4 = PAWN_CAPTURES[1][sq("e4")];
        assert_eq!(black_e4, (1 << sq("d3")) | (1 << sq("f3")));
        // Edge file only has one capture square
        let white_a2 = PAWN_CAPTURES[0][sq("a2")];
        assert_eq!(white_a2, 1 << sq("b3"));
    }

    #[test]
    fn castle_geometry_white() {
        let wk = &CASTLES[castle_index(Color::White, true)];
        assert_eq!(wk.king_from, 1 << sq("e1"));
        assert_eq!(wk.king_to, 1 << sq("g1"));
        assert_eq!(wk.rook_from, 1 << sq("h1"));
        assert_eq!(wk.rook_to, 1 << sq("f1"));
        assert_eq!(wk.between, (1 << sq("f1")) | (1 << sq("g1")));
        assert_eq!(
            wk.king_path,
            (1 << sq("e1")) | (1 << sq("f1")) | (1 << sq("g1"))
        );

        let wq = &CASTLES[castle_index(Color::White, false)];
        assert_eq!(
            wq.between,
            (1 << sq("b1")) | (1 << sq("c1")) | (1 << sq("d1"))
        );
        // b1 is rook-transit only: not part of the king path
        assert_eq!(
            wq.king_path,
            (1 << sq("c1")) | (1 << sq("d1")) | (1 << sq("e1"))
        );
    }

    #[test]
    fn castle_geometry_black_mirrors_white() {
        use crate::board::bits::mirror_vertical;
        for kingside in [true, false] {
            let white = &CASTLES[castle_index(Color::White, kingside)];
            let black = &CASTLES[castle_index(Color::Black, kingside)];
            assert_eq!(mirror_vertical(white.between), black.between);
            assert_eq!(mirror_vertical(white.king_path), black.king_path);
            assert_eq!(mirror_vertical(white.rook_from), black.rook_from);
        }
    }
}
