//! Precomputed attack tables.
//!
//! [`AttackTables::new`] builds every table in one go and returns an immutable
//! value. Positions hold it behind an `Arc`; [`shared`] hands out the
//! process-wide instance, built on first use.

mod leapers;
mod magic;

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::board::types::{Bitboard, Color, PieceType, Square};
use magic::{init_slider, Magic, Slider, BISHOP_TABLE_SIZE, ROOK_TABLE_SIZE};

static SHARED: Lazy<Arc<AttackTables>> = Lazy::new(|| Arc::new(AttackTables::new()));

/// The process-wide attack tables.
///
/// Built exactly once; later calls return the same instance.
#[must_use]
pub fn shared() -> Arc<AttackTables> {
    Arc::clone(&SHARED)
}

/// Immutable attack lookup tables for every piece type.
#[derive(Clone, PartialEq, Eq)]
pub struct AttackTables {
    pawn: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    bishop_pseudo: [Bitboard; 64],
    rook_pseudo: [Bitboard; 64],
    rook_magics: [Magic; 64],
    bishop_magics: [Magic; 64],
    /// Rook entries first, then bishop entries
    sliders: Vec<Bitboard>,
    between: Vec<[Bitboard; 64]>,
    line: Vec<[Bitboard; 64]>,
}

impl AttackTables {
    /// Build all tables. Deterministic: two calls produce identical values.
    #[must_use]
    pub fn new() -> Self {
        let mut sliders = vec![Bitboard::EMPTY; ROOK_TABLE_SIZE + BISHOP_TABLE_SIZE];
        let rook_magics = init_slider(Slider::Rook, &mut sliders, 0);
        let bishop_magics = init_slider(Slider::Bishop, &mut sliders, ROOK_TABLE_SIZE);

        let mut bishop_pseudo = [Bitboard::EMPTY; 64];
        let mut rook_pseudo = [Bitboard::EMPTY; 64];
        for sq in 0..64 {
            bishop_pseudo[sq] = Bitboard(Slider::Bishop.empty_board(sq));
            rook_pseudo[sq] = Bitboard(Slider::Rook.empty_board(sq));
        }

        let mut tables = AttackTables {
            pawn: leapers::pawn_table(),
            knight: leapers::knight_table(),
            king: leapers::king_table(),
            bishop_pseudo,
            rook_pseudo,
            rook_magics,
            bishop_magics,
            sliders,
            between: vec![[Bitboard::EMPTY; 64]; 64],
            line: vec![[Bitboard::EMPTY; 64]; 64],
        };
        tables.init_lines();

        #[cfg(feature = "logging")]
        log::debug!(
            "attack tables built: {} rook and {} bishop entries",
            ROOK_TABLE_SIZE,
            BISHOP_TABLE_SIZE
        );

        tables
    }

    fn init_lines(&mut self) {
        for s1 in Square::all() {
            for s2 in Square::all() {
                let mut line = Bitboard::EMPTY;
                let mut between = Bitboard::EMPTY;
                for pt in [PieceType::Bishop, PieceType::Rook] {
                    if self.pseudo_attacks(pt, s1).contains(s2) {
                        line = (self.attacks(pt, s1, Bitboard::EMPTY)
                            & self.attacks(pt, s2, Bitboard::EMPTY))
                            | s1
                            | s2;
                        between = self.attacks(pt, s1, Bitboard::from_square(s2))
                            & self.attacks(pt, s2, Bitboard::from_square(s1));
                    }
                }
                self.line[s1.index()][s2.index()] = line;
                self.between[s1.index()][s2.index()] = between | s2;
            }
        }
    }

    /// Squares a pawn of `color` on `sq` attacks
    #[inline]
    #[must_use]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.sliders[self.bishop_magics[sq.index()].index(occupied.0)]
    }

    #[inline]
    #[must_use]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.sliders[self.rook_magics[sq.index()].index(occupied.0)]
    }

    #[inline]
    #[must_use]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupied) | self.rook_attacks(sq, occupied)
    }

    /// Empty-board attacks of a non-pawn piece type.
    ///
    /// Pawns are color-dependent; use [`AttackTables::pawn_attacks`].
    #[inline]
    #[must_use]
    pub fn pseudo_attacks(&self, pt: PieceType, sq: Square) -> Bitboard {
        let s = sq.index();
        match pt {
            PieceType::Knight => self.knight[s],
            PieceType::Bishop => self.bishop_pseudo[s],
            PieceType::Rook => self.rook_pseudo[s],
            PieceType::Queen => self.bishop_pseudo[s] | self.rook_pseudo[s],
            PieceType::King => self.king[s],
            PieceType::Pawn => {
                debug_assert!(false, "pawn attacks depend on color");
                Bitboard::EMPTY
            }
        }
    }

    /// Attacks of a non-pawn piece type on `sq` given board occupancy.
    #[inline]
    #[must_use]
    pub fn attacks(&self, pt: PieceType, sq: Square, occupied: Bitboard) -> Bitboard {
        match pt {
            PieceType::Bishop => self.bishop_attacks(sq, occupied),
            PieceType::Rook => self.rook_attacks(sq, occupied),
            PieceType::Queen => self.queen_attacks(sq, occupied),
            _ => self.pseudo_attacks(pt, sq),
        }
    }

    /// Squares strictly between `a` and `b`, plus `b` itself.
    ///
    /// When the squares share no rank, file or diagonal the result is `{b}`.
    #[inline]
    #[must_use]
    pub fn between(&self, a: Square, b: Square) -> Bitboard {
        self.between[a.index()][b.index()]
    }

    /// The whole rank, file or diagonal through `a` and `b`, or empty if they
    /// are not aligned.
    #[inline]
    #[must_use]
    pub fn line(&self, a: Square, b: Square) -> Bitboard {
        self.line[a.index()][b.index()]
    }

    /// True if `c` lies on the line through `a` and `b`
    #[inline]
    #[must_use]
    pub(crate) fn aligned(&self, a: Square, b: Square, c: Square) -> bool {
        self.line(a, b).contains(c)
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        AttackTables::new()
    }
}

impl fmt::Debug for AttackTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackTables")
            .field("slider_entries", &self.sliders.len())
            .finish_non_exhaustive()
    }
}
