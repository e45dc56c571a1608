//! Move generation.
//!
//! [`GenType`] selects which pseudo-legal moves are produced. `Legal` runs the
//! in-check or not-in-check generator and then drops the moves that would leave
//! the king attacked.

mod pawns;
mod pieces;

use super::position::Position;
use super::types::{Bitboard, Move, MoveKind, MoveList, PieceType, Square};

/// Move generation categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenType {
    /// Captures and queen promotions
    Tacticals,
    /// Non-captures and underpromotions
    Quiets,
    /// Moves answering a check. Only valid while in check.
    Evasions,
    /// Captures and non-captures. Only valid while not in check.
    NonEvasions,
    /// Every legal move
    Legal,
}

impl Position {
    /// Generate moves of the given category.
    ///
    /// `Evasions` must only be requested while in check, and `Tacticals`,
    /// `Quiets` and `NonEvasions` only while not in check.
    #[must_use]
    pub fn generate(&self, gen: GenType) -> MoveList {
        let mut list = MoveList::new();
        match gen {
            GenType::Legal => generate_legal(self, &mut list),
            _ => generate_all(self, gen, &mut list),
        }
        list
    }

    /// All legal moves in this position
    #[inline]
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.generate(GenType::Legal)
    }

    /// Side to move is in check and has no legal move
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    /// Side to move is not in check and has no legal move
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.legal_moves().is_empty()
    }
}

fn generate_all(pos: &Position, gen: GenType, list: &mut MoveList) {
    debug_assert!(gen != GenType::Legal);
    debug_assert_eq!(gen == GenType::Evasions, pos.in_check());

    let us = pos.side_to_move();
    let ksq = pos.king_square(us);
    let checkers = pos.checkers();

    // Under double check only the king can move
    if gen != GenType::Evasions || !checkers.more_than_one() {
        let target = match gen {
            GenType::Evasions => pos.tables().between(ksq, checkers.lsb()),
            GenType::NonEvasions => !pos.pieces_by_color(us),
            GenType::Tacticals => pos.pieces_by_color(!us),
            _ => !pos.pieces(),
        };

        pawns::generate_pawn_moves(pos, gen, target, list);
        for pt in [
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
        ] {
            pieces::generate_piece_moves(pos, pt, target, list);
        }
    }

    let king_target = match gen {
        GenType::Evasions | GenType::NonEvasions => !pos.pieces_by_color(us),
        GenType::Tacticals => pos.pieces_by_color(!us),
        _ => !pos.pieces(),
    };
    pieces::generate_king_moves(pos, ksq, king_target, list);

    if matches!(gen, GenType::Quiets | GenType::NonEvasions) {
        pieces::generate_castling(pos, ksq, list);
    }
}

/// Generate pseudo-legal moves and drop the illegal ones in place.
///
/// Only moves of pinned pieces, king moves and en passant captures can be
/// illegal after the evasion/non-evasion split, so only those are checked.
/// A failing move is replaced by the last one in the list, so order is not
/// preserved.
fn generate_legal(pos: &Position, list: &mut MoveList) {
    let us = pos.side_to_move();
    let pinned = pos.blockers_for_king(us) & pos.pieces_by_color(us);
    let ksq = pos.king_square(us);

    let gen = if pos.in_check() {
        GenType::Evasions
    } else {
        GenType::NonEvasions
    };
    generate_all(pos, gen, list);

    let mut i = 0;
    while i < list.len() {
        let mv = list[i];
        let needs_check = pinned.contains(mv.from())
            || mv.from() == ksq
            || mv.kind() == MoveKind::EnPassant;
        if needs_check && !pos.legal(mv) {
            list.swap_remove(i);
        } else {
            i += 1;
        }
    }
}

/// Push a move from `from` to every square of `targets`.
#[inline]
fn splat_moves(list: &mut MoveList, from: Square, targets: Bitboard) {
    for to in targets {
        list.push(Move::new(from, to));
    }
}
