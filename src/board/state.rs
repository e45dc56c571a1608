use super::types::{Bitboard, CastlingRights, Piece, Square};

/// Per-ply state that cannot be recomputed cheaply when a move is taken back.
///
/// `Position` keeps one `State` per move made on top of the root state, so
/// unmaking a move is a pop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct State {
    pub(crate) castling_rights: CastlingRights,
    pub(crate) ep_square: Option<Square>,
    /// Half-moves since the last capture or pawn move
    pub(crate) rule50: u32,
    /// Piece captured by the move that produced this state
    pub(crate) captured: Option<Piece>,
    /// Pieces giving check to the side to move
    pub(crate) checkers: Bitboard,
    /// Pieces of either color shielding the king of `[color]` from a slider
    pub(crate) blockers_for_king: [Bitboard; 2],
    /// Sliders of `[color]` pinning a piece to the other king
    pub(crate) pinners: [Bitboard; 2],
}

impl State {
    /// State for the next ply: carries the rights and clock over, clears the rest.
    #[inline]
    pub(crate) fn successor(&self) -> State {
        State {
            castling_rights: self.castling_rights,
            rule50: self.rule50.saturating_add(1),
            ..State::default()
        }
    }
}
