//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: CastlingRights = CastlingRights(CASTLE_WHITE_K);
    pub const WHITE_QUEENSIDE: CastlingRights = CastlingRights(CASTLE_WHITE_Q);
    pub const BLACK_KINGSIDE: CastlingRights = CastlingRights(CASTLE_BLACK_K);
    pub const BLACK_QUEENSIDE: CastlingRights = CastlingRights(CASTLE_BLACK_Q);
    pub const ALL: CastlingRights = CastlingRights(ALL_CASTLING_RIGHTS);

    /// The four single rights in FEN order (K, Q, k, q)
    pub const SINGLES: [CastlingRights; 4] = [
        Self::WHITE_KINGSIDE,
        Self::WHITE_QUEENSIDE,
        Self::BLACK_KINGSIDE,
        Self::BLACK_QUEENSIDE,
    ];

    /// The single right for one color and wing
    #[inline]
    #[must_use]
    pub const fn single(color: Color, kingside: bool) -> Self {
        CastlingRights(match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        })
    }

    /// Both rights belonging to `color`
    #[inline]
    #[must_use]
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::White => CastlingRights(CASTLE_WHITE_K | CASTLE_WHITE_Q),
            Color::Black => CastlingRights(CASTLE_BLACK_K | CASTLE_BLACK_Q),
        }
    }

    /// Rights lost when a piece leaves or arrives on `sq`.
    ///
    /// Only the king and rook home squares carry rights.
    #[inline]
    #[must_use]
    pub const fn touched_by(sq: Square) -> Self {
        CastlingRights(match sq.index() {
            0 => CASTLE_WHITE_Q,
            7 => CASTLE_WHITE_K,
            4 => CASTLE_WHITE_K | CASTLE_WHITE_Q,
            56 => CASTLE_BLACK_Q,
            63 => CASTLE_BLACK_K,
            60 => CASTLE_BLACK_K | CASTLE_BLACK_Q,
            _ => 0,
        })
    }

    /// True if any right in `other` is present
    #[inline]
    #[must_use]
    pub const fn has(self, other: CastlingRights) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn insert(&mut self, other: CastlingRights) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: CastlingRights) {
        self.0 &= !other.0;
    }

    /// Get the raw bitmask value
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Create from raw bitmask value (extra bits are dropped)
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        CastlingRights(value & ALL_CASTLING_RIGHTS)
    }

    /// Color and wing of a single right.
    #[must_use]
    pub(crate) const fn side(self) -> (Color, bool) {
        match self.0 {
            CASTLE_WHITE_K => (Color::White, true),
            CASTLE_WHITE_Q => (Color::White, false),
            CASTLE_BLACK_K => (Color::Black, true),
            _ => (Color::Black, false),
        }
    }

    /// Rook home square for a single right
    #[must_use]
    pub const fn rook_square(self) -> Square {
        match self.0 {
            CASTLE_WHITE_K => Square::H1,
            CASTLE_WHITE_Q => Square::A1,
            CASTLE_BLACK_K => Square::H8,
            _ => Square::A8,
        }
    }

    /// Squares that must be empty for a single right to be used
    #[must_use]
    pub(crate) const fn path_mask(self) -> u64 {
        match self.0 {
            // f1 g1 | b1 c1 d1
            CASTLE_WHITE_K => 0x60,
            CASTLE_WHITE_Q => 0x0E,
            CASTLE_BLACK_K => 0x60 << 56,
            _ => 0x0E << 56,
        }
    }
}

impl fmt::Display for CastlingRights {
    /// FEN castling field: subset of `KQkq`, or `-`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (right, c) in Self::SINGLES.iter().zip(['K', 'Q', 'k', 'q']) {
            if self.has(*right) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touched_by() {
        assert_eq!(CastlingRights::touched_by(Square::A1), CastlingRights::WHITE_QUEENSIDE);
        assert_eq!(
            CastlingRights::touched_by(Square::E8),
            CastlingRights::for_color(Color::Black)
        );
        assert!(CastlingRights::touched_by(Square::D4).is_empty());
    }

    #[test]
    fn test_fen_display() {
        assert_eq!(CastlingRights::ALL.to_string(), "KQkq");
        assert_eq!(CastlingRights::NONE.to_string(), "-");
        let mut rights = CastlingRights::ALL;
        rights.remove(CastlingRights::WHITE_QUEENSIDE);
        rights.remove(CastlingRights::BLACK_KINGSIDE);
        assert_eq!(rights.to_string(), "Kq");
    }

    #[test]
    fn test_rook_squares_and_sides() {
        assert_eq!(CastlingRights::BLACK_KINGSIDE.rook_square(), Square::H8);
        assert_eq!(CastlingRights::WHITE_QUEENSIDE.side(), (Color::White, false));
        assert_eq!(CastlingRights::single(Color::Black, false), CastlingRights::BLACK_QUEENSIDE);
    }
}
