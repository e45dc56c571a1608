//! Chess rules engine.
//!
//! Represents a position with bitboards and generates pseudo-legal and legal
//! moves for it, with incremental make/unmake. Attack tables are built once per
//! process and shared between positions.
//!
//! ```
//! use chess_rules::Position;
//!
//! let mut pos = Position::new();
//! assert_eq!(pos.perft(3), 8902);
//! ```

pub mod board;

pub use board::{
    Bitboard, CastlingRights, Color, FenError, GenType, Move, MoveList, MoveParseError, Piece,
    PieceType, Position, Square,
};
