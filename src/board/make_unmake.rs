use super::position::Position;
use super::types::{CastlingRights, Move, MoveKind, Piece, PieceType, Square};

/// King and rook destinations for a castling move encoded king -> rook.
#[inline]
fn castling_squares(king_from: Square, rook_from: Square) -> (Square, Square) {
    let step: i8 = if king_from > rook_from { -1 } else { 1 };
    let king_to = king_from.offset(2 * step);
    (king_to, king_to.offset(-step))
}

impl Position {
    /// Play the legal move `m`, pushing a new state.
    ///
    /// Must be paired with [`Position::unmake_move`] on the same move.
    pub fn make_move(&mut self, m: Move) {
        debug_assert!(m.is_ok());
        debug_assert!(self.legal(m), "illegal move {m:?}");

        let from = m.from();
        let to = m.to();
        let us = self.side_to_move;
        let them = !us;
        let kind = m.kind();

        let next = self.state().successor();
        self.states.push(next);

        if !matches!(kind, MoveKind::EnPassant | MoveKind::Castling) && !self.is_empty(to) {
            let captured = self.remove_piece(to);
            self.state_mut().captured = captured;
        }

        let moved_pawn = self
            .piece_on(from)
            .is_some_and(|p| p.piece_type() == PieceType::Pawn);

        if moved_pawn || self.state().captured.is_some() {
            self.state_mut().rule50 = 0;
        }

        // A double push only leaves an en passant square if an enemy pawn can take there
        if moved_pawn && from.relative_rank(us) == 1 && to.relative_rank(us) == 3 {
            let target = from.offset(us.pawn_push());
            let capturers =
                self.tables.pawn_attacks(us, target) & self.pieces_of(them, PieceType::Pawn);
            if capturers.any() {
                self.state_mut().ep_square = Some(target);
            }
        }

        match kind {
            MoveKind::EnPassant => {
                debug_assert!(self.is_empty(to));
                let capsq = to.offset(-us.pawn_push());
                let captured = self.remove_piece(capsq);
                self.state_mut().captured = captured;
                self.move_piece(from, to);
            }
            MoveKind::Castling => {
                debug_assert_eq!(self.piece_on(to), Some(Piece::new(us, PieceType::Rook)));
                let (king_to, rook_to) = castling_squares(from, to);
                self.move_piece(from, king_to);
                self.move_piece(to, rook_to);
            }
            MoveKind::Promotion(pt) => {
                debug_assert_eq!(to.relative_rank(us), 7);
                self.remove_piece(from);
                self.put_piece(Piece::new(us, pt), to);
            }
            MoveKind::Normal => self.move_piece(from, to),
        }

        let lost = CastlingRights::from_u8(
            CastlingRights::touched_by(from).as_u8() | CastlingRights::touched_by(to).as_u8(),
        );
        if !lost.is_empty() {
            self.state_mut().castling_rights.remove(lost);
        }

        self.game_ply = self.game_ply.wrapping_add(1);
        self.side_to_move = them;
        self.set_check_info();
    }

    /// Take back `m`, which must be the last move made.
    pub fn unmake_move(&mut self, m: Move) {
        debug_assert!(m.is_ok());
        debug_assert!(self.states.len() > 1, "unmake_move without a matching make_move");

        let from = m.from();
        let to = m.to();
        let us = !self.side_to_move;
        let captured = self.state().captured;

        match m.kind() {
            MoveKind::EnPassant => {
                self.move_piece(to, from);
                if let Some(pawn) = captured {
                    self.put_piece(pawn, to.offset(-us.pawn_push()));
                }
            }
            MoveKind::Castling => {
                let (king_to, rook_to) = castling_squares(from, to);
                self.move_piece(king_to, from);
                self.move_piece(rook_to, to);
            }
            MoveKind::Promotion(_) => {
                self.remove_piece(to);
                self.put_piece(Piece::new(us, PieceType::Pawn), from);
            }
            MoveKind::Normal => self.move_piece(to, from),
        }

        if !m.is_en_passant() {
            if let Some(piece) = captured {
                self.put_piece(piece, to);
            }
        }

        self.states.pop();
        self.game_ply = self.game_ply.wrapping_sub(1);
        self.side_to_move = us;
    }
}
