use super::GenType;
use crate::board::position::Position;
use crate::board::types::{Bitboard, Color, Direction, Move, MoveList, PieceType, Square};

/// Push directions for one side: straight, toward the h-file, toward the a-file
/// (from White's point of view).
#[inline]
const fn directions(us: Color) -> (Direction, Direction, Direction) {
    match us {
        Color::White => (Direction::North, Direction::NorthEast, Direction::NorthWest),
        Color::Black => (Direction::South, Direction::SouthWest, Direction::SouthEast),
    }
}

/// Push a pawn move for every square of `targets`, reached by one `steps`-fold
/// step in `dir`.
#[inline]
fn splat_pawn_moves(list: &mut MoveList, dir: Direction, steps: i8, targets: Bitboard) {
    for to in targets {
        list.push(Move::new(to.offset(-dir.delta() * steps), to));
    }
}

fn make_promotions(list: &mut MoveList, gen: GenType, dir: Direction, to: Square, enemy: bool) {
    let all = matches!(gen, GenType::Evasions | GenType::NonEvasions);
    let from = to.offset(-dir.delta());

    if gen == GenType::Tacticals || all {
        list.push(Move::promotion(from, to, PieceType::Queen));
    }

    let under = (gen == GenType::Tacticals && enemy) || (gen == GenType::Quiets && !enemy) || all;
    if under {
        for pt in [PieceType::Rook, PieceType::Bishop, PieceType::Knight] {
            list.push(Move::promotion(from, to, pt));
        }
    }
}

pub(super) fn generate_pawn_moves(
    pos: &Position,
    gen: GenType,
    target: Bitboard,
    list: &mut MoveList,
) {
    let us = pos.side_to_move();
    let them = !us;
    let (up, up_right, up_left) = directions(us);
    let (rank7, rank3) = match us {
        Color::White => (Bitboard::RANK_7, Bitboard::RANK_3),
        Color::Black => (Bitboard::RANK_2, Bitboard::RANK_6),
    };

    let enemies = if gen == GenType::Evasions {
        pos.checkers()
    } else {
        pos.pieces_by_color(them)
    };
    let empty = !pos.pieces();

    let pawns = pos.pieces_of(us, PieceType::Pawn);
    let on7 = pawns & rank7;
    let not_on7 = pawns & !rank7;

    if gen != GenType::Tacticals {
        let mut single = not_on7.shift(up) & empty;
        let mut double = (single & rank3).shift(up) & empty;

        if gen == GenType::Evasions {
            single &= target;
            double &= target;
        }

        splat_pawn_moves(list, up, 1, single);
        splat_pawn_moves(list, up, 2, double);
    }

    if on7.any() {
        let right = on7.shift(up_right) & enemies;
        let left = on7.shift(up_left) & enemies;
        let mut push = on7.shift(up) & empty;

        if gen == GenType::Evasions {
            push &= target;
        }

        for to in right {
            make_promotions(list, gen, up_right, to, true);
        }
        for to in left {
            make_promotions(list, gen, up_left, to, true);
        }
        for to in push {
            make_promotions(list, gen, up, to, false);
        }
    }

    if gen == GenType::Quiets {
        return;
    }

    splat_pawn_moves(list, up_right, 1, not_on7.shift(up_right) & enemies);
    splat_pawn_moves(list, up_left, 1, not_on7.shift(up_left) & enemies);

    if let Some(ep) = pos.ep_square() {
        debug_assert_eq!(ep.relative_rank(us), 5);

        // Taking en passant cannot resolve a discovered check
        if gen == GenType::Evasions && target.contains(ep.offset(up.delta())) {
            return;
        }

        let capturers = not_on7 & pos.tables().pawn_attacks(them, ep);
        debug_assert!(capturers.any());
        for from in capturers {
            list.push(Move::en_passant(from, ep));
        }
    }
}
