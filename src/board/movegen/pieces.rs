use super::splat_moves;
use crate::board::position::Position;
use crate::board::types::{Bitboard, CastlingRights, Move, MoveList, PieceType, Square};

/// Knight, bishop, rook and queen moves of the side to move onto `target`.
pub(super) fn generate_piece_moves(
    pos: &Position,
    pt: PieceType,
    target: Bitboard,
    list: &mut MoveList,
) {
    debug_assert!(pt != PieceType::Pawn && pt != PieceType::King);

    let occupied = pos.pieces();
    for from in pos.pieces_of(pos.side_to_move(), pt) {
        let to = pos.tables().attacks(pt, from, occupied) & target;
        splat_moves(list, from, to);
    }
}

pub(super) fn generate_king_moves(
    pos: &Position,
    ksq: Square,
    target: Bitboard,
    list: &mut MoveList,
) {
    splat_moves(list, ksq, pos.tables().king_attacks(ksq) & target);
}

/// Castling moves whose right is held and whose path is empty.
///
/// Attacked transit squares are left to [`Position::legal`].
pub(super) fn generate_castling(pos: &Position, ksq: Square, list: &mut MoveList) {
    let us = pos.side_to_move();
    if !pos.can_castle(CastlingRights::for_color(us)) {
        return;
    }

    for kingside in [true, false] {
        let right = CastlingRights::single(us, kingside);
        if pos.can_castle(right) && !pos.castling_impeded(right) {
            list.push(Move::castling(ksq, right.rook_square()));
        }
    }
}
