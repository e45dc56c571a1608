//! Occupancy-independent attack sets and the ray walker used to build slider tables.

use crate::board::types::{Bitboard, Color, Direction, Square};

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(super) const ROOK_DIRS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(super) const BISHOP_DIRS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[inline]
fn on_board(r: isize, f: isize) -> bool {
    (0..8).contains(&r) && (0..8).contains(&f)
}

fn step_table(deltas: &[(isize, isize)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let (nr, nf) = (r + dr, f + df);
            if on_board(nr, nf) {
                mask |= 1u64 << (nr * 8 + nf);
            }
        }
        *slot = Bitboard(mask);
    }
    attacks
}

pub(super) fn knight_table() -> [Bitboard; 64] {
    step_table(&KNIGHT_DELTAS)
}

pub(super) fn king_table() -> [Bitboard; 64] {
    step_table(&KING_DELTAS)
}

/// Pawn capture squares, indexed `[color][square]`.
pub(super) fn pawn_table() -> [[Bitboard; 64]; 2] {
    let mut attacks = [[Bitboard::EMPTY; 64]; 2];
    for color in Color::BOTH {
        for sq in Square::all() {
            attacks[color.index()][sq.index()] = pawn_attacks_bb(color, Bitboard::from_square(sq));
        }
    }
    attacks
}

/// Squares attacked by a slider on `sq` moving along `dirs`, stopping at
/// (and including) the first occupied square of each ray.
pub(super) fn sliding_attack(dirs: &[(isize, isize)], sq: usize, occupied: u64) -> u64 {
    let r = (sq / 8) as isize;
    let f = (sq % 8) as isize;
    let mut attacks = 0u64;
    for &(dr, df) in dirs {
        let (mut nr, mut nf) = (r + dr, f + df);
        while on_board(nr, nf) {
            let bit = 1u64 << (nr * 8 + nf);
            attacks |= bit;
            if occupied & bit != 0 {
                break;
            }
            nr += dr;
            nf += df;
        }
    }
    attacks
}

/// Squares attacked by every pawn of `color` in `pawns`.
fn pawn_attacks_bb(color: Color, pawns: Bitboard) -> Bitboard {
    match color {
        Color::White => pawns.shift(Direction::NorthWest) | pawns.shift(Direction::NorthEast),
        Color::Black => pawns.shift(Direction::SouthWest) | pawns.shift(Direction::SouthEast),
    }
}
