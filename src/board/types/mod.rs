//! Core chess types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - `Piece`, `PieceType` and `Color` - chess pieces and colors
//! - `Square` - compact board square representation (u8)
//! - `Bitboard` - 64-bit board representation
//! - `Move` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter, Direction};
pub use castling::CastlingRights;
pub use moves::{Move, MoveKind, MoveList, MoveListIntoIter};
pub use piece::{Color, Piece, PieceType};
pub use square::Square;
