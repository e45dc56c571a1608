//! Chess position representation and move generation.
//!
//! Uses bitboards with pext-indexed slider tables. Supports the full rules of
//! movement including castling, en passant and promotions.
//!
//! # Example
//! ```
//! use chess_rules::board::{GenType, Position};
//!
//! let mut pos = Position::new();
//! let moves = pos.generate(GenType::Legal);
//! assert_eq!(moves.len(), 20);
//!
//! pos.make_move_uci("e2e4").unwrap();
//! assert_eq!(pos.legal_moves().len(), 20);
//! ```

pub mod attack_tables;
mod display;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod perft;
mod position;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use attack_tables::AttackTables;
pub use error::{FenError, MoveParseError, SquareError};
pub use fen::START_FEN;
pub use movegen::GenType;
pub use position::Position;
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Direction, Move, MoveKind, MoveList,
    MoveListIntoIter, Piece, PieceType, Square,
};
