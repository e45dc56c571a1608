//! Position representation, queries and legality.

use std::fmt;
use std::sync::Arc;

use super::attack_tables::{self, AttackTables};
use super::state::State;
use super::types::{Bitboard, CastlingRights, Color, Move, MoveKind, Piece, PieceType, Square};

/// A chess position with its move history.
///
/// Piece placement is kept three ways (per-square array, per-type bitboards,
/// per-color bitboards) and all three are updated together by the mutators.
/// Every move made pushes a [`State`]; unmaking pops it.
#[derive(Clone)]
pub struct Position {
    pub(crate) tables: Arc<AttackTables>,
    pub(crate) board: [Option<Piece>; 64],
    pub(crate) by_color: [Bitboard; 2],
    /// Slot 0 holds all pieces, slots 1-6 one piece type each
    pub(crate) by_type: [Bitboard; 7],
    pub(crate) side_to_move: Color,
    pub(crate) game_ply: u32,
    pub(crate) states: Vec<State>,
}

const ALL_PIECES: usize = 0;

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut pos = Position::empty(attack_tables::shared());
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (file, pt) in back_rank.iter().enumerate() {
            let sq = Square::from_index(file);
            pos.put_piece(Piece::new(Color::White, *pt), sq);
            pos.put_piece(Piece::new(Color::Black, *pt), sq.flip_rank());
            pos.put_piece(Piece::WHITE_PAWN, sq.offset(8));
            pos.put_piece(Piece::BLACK_PAWN, sq.offset(48));
        }
        pos.state_mut().castling_rights = CastlingRights::ALL;
        pos.set_check_info();
        pos
    }

    /// Board with no pieces, White to move, a single root state.
    pub(crate) fn empty(tables: Arc<AttackTables>) -> Self {
        Position {
            tables,
            board: [None; 64],
            by_color: [Bitboard::EMPTY; 2],
            by_type: [Bitboard::EMPTY; 7],
            side_to_move: Color::White,
            game_ply: 0,
            states: vec![State::default()],
        }
    }

    /// The attack tables this position uses
    #[inline]
    #[must_use]
    pub fn tables(&self) -> &AttackTables {
        &self.tables
    }

    #[inline]
    pub(crate) fn state(&self) -> &State {
        // The root state is never popped
        &self.states[self.states.len() - 1]
    }

    #[inline]
    pub(crate) fn state_mut(&mut self) -> &mut State {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    // ---- piece queries ----

    #[inline]
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.board[sq.index()].is_none()
    }

    /// All occupied squares
    #[inline]
    #[must_use]
    pub fn pieces(&self) -> Bitboard {
        self.by_type[ALL_PIECES]
    }

    #[inline]
    #[must_use]
    pub fn pieces_by_color(&self, color: Color) -> Bitboard {
        self.by_color[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn pieces_by_type(&self, pt: PieceType) -> Bitboard {
        self.by_type[pt.index()]
    }

    /// Union of several piece types, both colors
    #[inline]
    #[must_use]
    pub fn pieces_by_types(&self, types: &[PieceType]) -> Bitboard {
        types
            .iter()
            .fold(Bitboard::EMPTY, |acc, pt| acc | self.by_type[pt.index()])
    }

    #[inline]
    #[must_use]
    pub fn pieces_of(&self, color: Color, pt: PieceType) -> Bitboard {
        self.by_color[color.index()] & self.by_type[pt.index()]
    }

    /// Union of several piece types of one color
    #[inline]
    #[must_use]
    pub fn pieces_of_types(&self, color: Color, types: &[PieceType]) -> Bitboard {
        self.by_color[color.index()] & self.pieces_by_types(types)
    }

    /// Square of `color`'s king. Every valid position has exactly one.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces_of(color, PieceType::King).lsb()
    }

    /// Piece standing on the origin square of `m`
    #[inline]
    #[must_use]
    pub fn moved_piece(&self, m: Move) -> Option<Piece> {
        self.piece_on(m.from())
    }

    // ---- state queries ----

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Half-moves played since the game's first position
    #[inline]
    #[must_use]
    pub fn game_ply(&self) -> u32 {
        self.game_ply
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        1 + self.game_ply.wrapping_sub((self.side_to_move == Color::Black) as u32) / 2
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.state().rule50
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.state().castling_rights
    }

    #[inline]
    #[must_use]
    pub fn can_castle(&self, rights: CastlingRights) -> bool {
        self.state().castling_rights.has(rights)
    }

    /// True if a piece stands between king and rook for a single right
    #[inline]
    #[must_use]
    pub fn castling_impeded(&self, right: CastlingRights) -> bool {
        (self.pieces() & Bitboard(right.path_mask())).any()
    }

    #[inline]
    #[must_use]
    pub fn ep_square(&self) -> Option<Square> {
        self.state().ep_square
    }

    /// Pieces giving check to the side to move
    #[inline]
    #[must_use]
    pub fn checkers(&self) -> Bitboard {
        self.state().checkers
    }

    #[inline]
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.state().checkers.any()
    }

    /// Pieces of either color that alone block a slider from `color`'s king
    #[inline]
    #[must_use]
    pub fn blockers_for_king(&self, color: Color) -> Bitboard {
        self.state().blockers_for_king[color.index()]
    }

    /// Sliders of `color` pinning an enemy piece to the enemy king
    #[inline]
    #[must_use]
    pub fn pinners(&self, color: Color) -> Bitboard {
        self.state().pinners[color.index()]
    }

    /// Piece captured by the last move, if any
    #[inline]
    #[must_use]
    pub fn captured_piece(&self) -> Option<Piece> {
        self.state().captured
    }

    /// Number of moves made and not yet unmade
    #[inline]
    #[must_use]
    pub fn state_depth(&self) -> usize {
        self.states.len() - 1
    }

    // ---- low-level mutators ----

    /// Place `piece` on the empty square `sq`
    pub(crate) fn put_piece(&mut self, piece: Piece, sq: Square) {
        debug_assert!(self.is_empty(sq), "put_piece on occupied {sq}");
        self.board[sq.index()] = Some(piece);
        self.by_type[ALL_PIECES] |= sq;
        self.by_type[piece.piece_type().index()] |= sq;
        self.by_color[piece.color().index()] |= sq;
    }

    /// Remove and return the piece on the occupied square `sq`
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.board[sq.index()].take();
        debug_assert!(piece.is_some(), "remove_piece on empty {sq}");
        if let Some(p) = piece {
            self.by_type[ALL_PIECES] ^= sq;
            self.by_type[p.piece_type().index()] ^= sq;
            self.by_color[p.color().index()] ^= sq;
        }
        piece
    }

    /// Move the piece on `from` to the empty square `to`
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        debug_assert!(self.is_empty(to), "move_piece onto occupied {to}");
        let Some(piece) = self.board[from.index()].take() else {
            debug_assert!(false, "move_piece from empty {from}");
            return;
        };
        let from_to = Bitboard::from_square(from) | to;
        self.by_type[ALL_PIECES] ^= from_to;
        self.by_type[piece.piece_type().index()] ^= from_to;
        self.by_color[piece.color().index()] ^= from_to;
        self.board[to.index()] = Some(piece);
    }

    // ---- attacks ----

    /// Pieces of both colors attacking `sq`, given the current occupancy
    #[inline]
    #[must_use]
    pub fn attackers_to(&self, sq: Square) -> Bitboard {
        self.attackers_to_occ(sq, self.pieces())
    }

    /// Pieces of both colors attacking `sq` if the board were occupied by `occupied`
    #[must_use]
    pub fn attackers_to_occ(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let t = &*self.tables;
        (t.pawn_attacks(Color::Black, sq) & self.pieces_of(Color::White, PieceType::Pawn))
            | (t.pawn_attacks(Color::White, sq) & self.pieces_of(Color::Black, PieceType::Pawn))
            | (t.knight_attacks(sq) & self.pieces_by_type(PieceType::Knight))
            | (t.rook_attacks(sq, occupied)
                & self.pieces_by_types(&[PieceType::Rook, PieceType::Queen]))
            | (t.bishop_attacks(sq, occupied)
                & self.pieces_by_types(&[PieceType::Bishop, PieceType::Queen]))
            | (t.king_attacks(sq) & self.pieces_by_type(PieceType::King))
    }

    /// True if any piece of `by` attacks `sq` under `occupied`
    #[must_use]
    pub fn attackers_to_exist(&self, sq: Square, occupied: Bitboard, by: Color) -> bool {
        let t = &*self.tables;
        let them = self.pieces_by_color(by);
        self.slider_attackers_exist(sq, occupied, by)
            || (t.pawn_attacks(!by, sq) & them & self.pieces_by_type(PieceType::Pawn)).any()
            || (t.knight_attacks(sq) & them & self.pieces_by_type(PieceType::Knight)).any()
            || (t.king_attacks(sq) & them & self.pieces_by_type(PieceType::King)).any()
    }

    fn slider_attackers_exist(&self, sq: Square, occupied: Bitboard, by: Color) -> bool {
        let t = &*self.tables;
        let rooks = self.pieces_of_types(by, &[PieceType::Rook, PieceType::Queen]);
        let bishops = self.pieces_of_types(by, &[PieceType::Bishop, PieceType::Queen]);
        (t.rook_attacks(sq, occupied) & rooks).any()
            || (t.bishop_attacks(sq, occupied) & bishops).any()
    }

    // ---- check and pin bookkeeping ----

    /// Recompute blockers for `color`'s king and the enemy sliders pinning them.
    pub(crate) fn update_slider_blockers(&mut self, color: Color) {
        let ksq = self.king_square(color);
        let them = !color;
        let t = &*self.tables;

        let snipers = ((t.pseudo_attacks(PieceType::Rook, ksq)
            & self.pieces_by_types(&[PieceType::Rook, PieceType::Queen]))
            | (t.pseudo_attacks(PieceType::Bishop, ksq)
                & self.pieces_by_types(&[PieceType::Bishop, PieceType::Queen])))
            & self.pieces_by_color(them);
        let occupancy = self.pieces() ^ snipers;

        let mut blockers = Bitboard::EMPTY;
        let mut pinners = Bitboard::EMPTY;
        for sniper in snipers {
            let b = t.between(ksq, sniper) & occupancy;
            if b.any() && !b.more_than_one() {
                blockers |= b;
                if (b & self.pieces_by_color(color)).any() {
                    pinners |= sniper;
                }
            }
        }

        let st = self.state_mut();
        st.blockers_for_king[color.index()] = blockers;
        st.pinners[them.index()] = pinners;
    }

    /// Recompute blockers for both kings and the checkers of the side to move.
    pub(crate) fn set_check_info(&mut self) {
        self.update_slider_blockers(Color::White);
        self.update_slider_blockers(Color::Black);
        let us = self.side_to_move;
        let checkers = self.attackers_to(self.king_square(us)) & self.pieces_by_color(!us);
        self.state_mut().checkers = checkers;
    }

    /// True if the pseudo-legal move `m` does not leave the mover's king in check.
    #[must_use]
    pub fn legal(&self, m: Move) -> bool {
        debug_assert!(m.is_ok());
        let us = self.side_to_move;
        let them = !us;
        let from = m.from();
        let to = m.to();
        let ksq = self.king_square(us);
        debug_assert_eq!(self.moved_piece(m).map(Piece::color), Some(us));

        match m.kind() {
            MoveKind::EnPassant => {
                let capsq = to.offset(-us.pawn_push());
                debug_assert_eq!(Some(to), self.ep_square());
                debug_assert_eq!(self.piece_on(capsq), Some(Piece::new(them, PieceType::Pawn)));
                let occupied = (self.pieces() ^ from ^ capsq) | to;
                !self.slider_attackers_exist(ksq, occupied, them)
            }
            MoveKind::Castling => {
                let kingside = to > from;
                let dest = (if kingside { Square::G1 } else { Square::C1 }).relative(us);
                let step: i8 = if kingside { -1 } else { 1 };
                // king is not in check, so its origin needs no test
                let mut s = dest;
                while s != from {
                    if self.attackers_to_exist(s, self.pieces(), them) {
                        return false;
                    }
                    s = s.offset(step);
                }
                true
            }
            _ if from == ksq => !self.attackers_to_exist(to, self.pieces() ^ from, them),
            _ => {
                !self.blockers_for_king(us).contains(from)
                    || self.tables.aligned(from, to, ksq)
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl PartialEq for Position {
    /// Placement, side to move, ply and the full state history. Tables are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.by_color == other.by_color
            && self.by_type == other.by_type
            && self.side_to_move == other.side_to_move
            && self.game_ply == other.game_ply
            && self.states == other.states
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.as_fen())
            .field("checkers", &self.checkers())
            .field("state_depth", &self.state_depth())
            .finish_non_exhaustive()
    }
}
