//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::PieceType;
use super::square::Square;

const TO_MASK: u16 = 0x3F;
const FROM_SHIFT: u16 = 6;
const PROMO_SHIFT: u16 = 12;
const KIND_SHIFT: u16 = 14;

const KIND_NORMAL: u16 = 0;
const KIND_PROMOTION: u16 = 1;
const KIND_EN_PASSANT: u16 = 2;
const KIND_CASTLING: u16 = 3;

/// Compact 16-bit move representation.
///
/// Encoding:
/// - bits 0-5:   destination square
/// - bits 6-11:  origin square
/// - bits 12-13: promotion piece type minus knight
/// - bits 14-15: kind (normal, promotion, en passant, castling)
///
/// Castling is stored as "king takes own rook": origin is the king square,
/// destination the rook square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

/// Decoded move kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Promotion(PieceType),
    EnPassant,
    Castling,
}

impl Move {
    /// No move. Origin and destination are both a1.
    pub const NONE: Move = Move(0);
    /// Null move. Origin and destination are both b1.
    pub const NULL: Move = Move(65);

    /// Create a normal move
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Move::with_kind(from, to, KIND_NORMAL, 0)
    }

    /// Create a promotion move. `piece_type` must be knight, bishop, rook or queen.
    #[inline]
    #[must_use]
    pub const fn promotion(from: Square, to: Square, piece_type: PieceType) -> Self {
        debug_assert!(
            piece_type as u8 >= PieceType::Knight as u8 && piece_type as u8 <= PieceType::Queen as u8,
            "invalid promotion piece"
        );
        let promo = (piece_type as u16).wrapping_sub(PieceType::Knight as u16) & 3;
        Move::with_kind(from, to, KIND_PROMOTION, promo)
    }

    /// Create an en passant capture
    #[inline]
    #[must_use]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move::with_kind(from, to, KIND_EN_PASSANT, 0)
    }

    /// Create a castling move from the king square to the rook square
    #[inline]
    #[must_use]
    pub const fn castling(king: Square, rook: Square) -> Self {
        Move::with_kind(king, rook, KIND_CASTLING, 0)
    }

    #[inline]
    const fn with_kind(from: Square, to: Square, kind: u16, promo: u16) -> Self {
        Move(
            to.index() as u16
                | (from.index() as u16) << FROM_SHIFT
                | promo << PROMO_SHIFT
                | kind << KIND_SHIFT,
        )
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index(((self.0 >> FROM_SHIFT) & TO_MASK) as usize)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index((self.0 & TO_MASK) as usize)
    }

    #[inline]
    const fn kind_bits(self) -> u16 {
        self.0 >> KIND_SHIFT
    }

    /// Decode the move kind
    #[inline]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        match self.kind_bits() {
            KIND_NORMAL => MoveKind::Normal,
            KIND_PROMOTION => MoveKind::Promotion(self.promotion_bits()),
            KIND_EN_PASSANT => MoveKind::EnPassant,
            _ => MoveKind::Castling,
        }
    }

    #[inline]
    const fn promotion_bits(self) -> PieceType {
        match (self.0 >> PROMO_SHIFT) & 3 {
            0 => PieceType::Knight,
            1 => PieceType::Bishop,
            2 => PieceType::Rook,
            _ => PieceType::Queen,
        }
    }

    /// Get the promotion piece type, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion_type(self) -> Option<PieceType> {
        if self.kind_bits() == KIND_PROMOTION {
            Some(self.promotion_bits())
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.kind_bits() == KIND_PROMOTION
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.kind_bits() == KIND_EN_PASSANT
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.kind_bits() == KIND_CASTLING
    }

    /// True for any real move; false for [`Move::NONE`] and [`Move::NULL`].
    #[inline]
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.from().index() != self.to().index()
    }

    /// Get the raw 16-bit value (for hashing/storage)
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Create from raw 16-bit value
    #[inline]
    #[must_use]
    pub const fn from_u16(value: u16) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Move::NONE {
            return write!(f, "Move(none)");
        }
        if *self == Move::NULL {
            return write!(f, "Move(null)");
        }
        write!(f, "Move({}{}", self.from(), self.to())?;
        match self.kind() {
            MoveKind::Normal => {}
            MoveKind::Promotion(pt) => write!(f, "={}", pt.to_char().to_ascii_uppercase())?,
            MoveKind::EnPassant => write!(f, " ep")?,
            MoveKind::Castling => write!(f, " castle")?,
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    /// Coordinate notation: `<from><to>[promotion]`, e.g. `e2e4`, `e7e8q`, `e1h1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion_type() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Upper bound on moves in any position.
pub(crate) const MAX_MOVES: usize = 256;

/// List of moves with fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NONE; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    /// Remove the move at `idx` by moving the last move into its slot.
    #[inline]
    pub(crate) fn swap_remove(&mut self, idx: usize) {
        debug_assert!(idx < self.len);
        self.len -= 1;
        self.moves[idx] = self.moves[self.len];
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for MoveList {
    /// One numbered move per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.iter().enumerate() {
            writeln!(f, "{}) {}", i + 1, mv)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        let mv = self.list.get(self.idx)?;
        self.idx += 1;
        Some(mv)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_layout() {
        let mv = Move::new(Square::E2, Square::E4);
        assert_eq!(mv.as_u16(), (12 << 6) | 28);
        assert_eq!(mv.from(), Square::E2);
        assert_eq!(mv.to(), Square::E4);
        assert_eq!(mv.kind(), MoveKind::Normal);
    }

    #[test]
    fn test_promotion_types() {
        for pt in PieceType::PROMOTIONS {
            let mv = Move::promotion(Square::B7, Square::A8, pt);
            assert_eq!(mv.kind(), MoveKind::Promotion(pt));
            assert_eq!(mv.promotion_type(), Some(pt));
            assert_eq!(mv.to(), Square::A8);
        }
        assert_eq!(Move::new(Square::B7, Square::B8).promotion_type(), None);
    }

    #[test]
    fn test_sentinels() {
        assert!(!Move::NONE.is_ok());
        assert!(!Move::NULL.is_ok());
        assert_ne!(Move::NONE, Move::NULL);
        assert_eq!(Move::NULL.from(), Square::B1);
        assert!(Move::castling(Square::E1, Square::H1).is_ok());
    }

    #[test]
    fn test_display_and_debug() {
        assert_eq!(Move::promotion(Square::E7, Square::E8, PieceType::Queen).to_string(), "e7e8q");
        assert_eq!(Move::castling(Square::E1, Square::H1).to_string(), "e1h1");
        assert_eq!(format!("{:?}", Move::en_passant(Square::E5, Square::D6)), "Move(e5d6 ep)");
        assert_eq!(format!("{:?}", Move::NONE), "Move(none)");
    }

    #[test]
    fn test_swap_remove() {
        let mut list = MoveList::new();
        let a = Move::new(Square::A2, Square::A3);
        let b = Move::new(Square::B2, Square::B3);
        let c = Move::new(Square::C2, Square::C3);
        list.push(a);
        list.push(b);
        list.push(c);
        list.swap_remove(0);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], c);
        assert!(list.contains(b));
        assert!(!list.contains(a));
    }
}
