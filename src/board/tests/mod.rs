//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts for move generation correctness
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `legality.rs` - Pins, checks, en passant and castling legality
//! - `attack_tables.rs` - Attack table construction and lookups
//! - `proptest.rs` - Property-based tests

mod attack_tables;
mod proptest;
