//! Attack table construction and lookup tests.

use crate::board::attack_tables::{self, AttackTables};
use crate::board::{Bitboard, Color, PieceType, Square};
use rand::prelude::*;
use std::sync::Arc;

/// Walk rays square by square until a blocker or the edge.
fn ray_attacks(sq: Square, occupied: Bitboard, dirs: &[(i32, i32)]) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for &(dr, df) in dirs {
        let mut r = sq.rank() as i32 + dr;
        let mut f = sq.file() as i32 + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = Square::from_index((r * 8 + f) as usize);
            result |= target;
            if occupied.contains(target) {
                break;
            }
            r += dr;
            f += df;
        }
    }
    result
}

const ROOK: &[(i32, i32)] = &[(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP: &[(i32, i32)] = &[(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[test]
fn test_sliders_match_ray_walk() {
    let tables = attack_tables::shared();
    let mut rng = StdRng::seed_from_u64(0xA77AC);

    for _ in 0..64 {
        // sparse and dense occupancies
        let occupied = Bitboard(rng.gen::<u64>() & rng.gen::<u64>());
        for sq in Square::all() {
            assert_eq!(
                tables.rook_attacks(sq, occupied),
                ray_attacks(sq, occupied, ROOK),
                "rook on {sq}"
            );
            assert_eq!(
                tables.bishop_attacks(sq, occupied),
                ray_attacks(sq, occupied, BISHOP),
                "bishop on {sq}"
            );
        }
    }
}

#[test]
fn test_build_is_deterministic() {
    assert_eq!(AttackTables::new(), AttackTables::new());
    assert_eq!(AttackTables::new(), *attack_tables::shared());
}

#[test]
fn test_shared_tables_built_once() {
    let a = attack_tables::shared();
    let b = attack_tables::shared();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_leaper_counts() {
    let tables = attack_tables::shared();
    assert_eq!(tables.knight_attacks(Square::A1).popcount(), 2);
    assert_eq!(tables.knight_attacks(Square::D4).popcount(), 8);
    assert_eq!(tables.king_attacks(Square::H8).popcount(), 3);
    assert_eq!(tables.king_attacks(Square::E4).popcount(), 8);
    assert_eq!(
        tables.pseudo_attacks(PieceType::Queen, Square::D4).popcount(),
        27
    );
}

#[test]
fn test_pawn_attacks_by_file() {
    let tables = attack_tables::shared();
    for color in Color::BOTH {
        for sq in Square::all() {
            let expected = match (sq.relative_rank(color), sq.file()) {
                (7, _) => 0,
                (_, 0) | (_, 7) => 1,
                _ => 2,
            };
            assert_eq!(
                tables.pawn_attacks(color, sq).popcount(),
                expected,
                "{color:?} pawn on {sq}"
            );
        }
    }
    assert_eq!(
        tables.pawn_attacks(Color::White, Square::A2),
        Bitboard::from_square(Square::B3)
    );
}

#[test]
fn test_between_is_symmetric_except_endpoint() {
    let tables = attack_tables::shared();
    for a in Square::all() {
        for b in Square::all() {
            if a == b || !tables.line(a, b).any() {
                continue;
            }
            assert_eq!(tables.between(a, b) ^ b, tables.between(b, a) ^ a);
            assert!(tables.line(a, b).contains(a) && tables.line(a, b).contains(b));
        }
    }
}
