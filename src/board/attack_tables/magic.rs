//! Occupancy-indexed slider attacks.
//!
//! Each square gets a mask of the occupancy bits that can change its attack set
//! (the piece's rays minus the board edges). The occupancy under that mask is
//! compressed into a dense index with a bit extraction (`pext`), and every
//! subset of the mask is precomputed into one shared table.

use super::leapers::{sliding_attack, BISHOP_DIRS, ROOK_DIRS};
use crate::board::types::Bitboard;

pub(super) const ROOK_TABLE_SIZE: usize = 0x19000;
pub(super) const BISHOP_TABLE_SIZE: usize = 0x1480;

const RANK_1: u64 = 0x0000_0000_0000_00FF;
const RANK_8: u64 = 0xFF00_0000_0000_0000;
const FILE_A: u64 = 0x0101_0101_0101_0101;
const FILE_H: u64 = 0x8080_8080_8080_8080;

/// Per-square slider lookup entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(super) struct Magic {
    pub(super) mask: u64,
    pub(super) offset: usize,
}

impl Magic {
    #[inline(always)]
    pub(super) fn index(&self, occupied: u64) -> usize {
        self.offset + pext(occupied, self.mask)
    }
}

/// Which slider a table is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    fn dirs(self) -> &'static [(isize, isize)] {
        match self {
            Slider::Bishop => &BISHOP_DIRS,
            Slider::Rook => &ROOK_DIRS,
        }
    }

    pub(super) fn table_size(self) -> usize {
        match self {
            Slider::Bishop => BISHOP_TABLE_SIZE,
            Slider::Rook => ROOK_TABLE_SIZE,
        }
    }

    /// Empty-board attacks from `sq`
    pub(super) fn empty_board(self, sq: usize) -> u64 {
        sliding_attack(self.dirs(), sq, 0)
    }
}

/// Parallel bit extract: gathers the bits of `occ` selected by `mask` into the
/// low bits of the result, preserving order.
#[inline(always)]
pub(super) fn pext(occ: u64, mask: u64) -> usize {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    {
        // SAFETY: the bmi2 target feature is enabled at compile time.
        unsafe { std::arch::x86_64::_pext_u64(occ, mask) as usize }
    }

    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        pext_scalar(occ, mask)
    }
}

#[cfg_attr(all(target_arch = "x86_64", target_feature = "bmi2"), allow(dead_code))]
fn pext_scalar(occ: u64, mask: u64) -> usize {
    let mut index = 0usize;
    let mut bit = 0usize;
    let mut m = mask;
    while m != 0 {
        let sq = m.trailing_zeros();
        m &= m - 1;
        if occ & (1u64 << sq) != 0 {
            index |= 1usize << bit;
        }
        bit += 1;
    }
    index
}

/// Fill `table` with attacks for every square and every relevant occupancy.
///
/// Returns the per-square lookup entries. Entries are laid out back to back in
/// square order starting at `base`.
pub(super) fn init_slider(slider: Slider, table: &mut [Bitboard], base: usize) -> [Magic; 64] {
    let mut magics = [Magic::default(); 64];
    let mut offset = base;

    for (sq, magic) in magics.iter_mut().enumerate() {
        let rank_bb = RANK_1 << (8 * (sq / 8));
        let file_bb = FILE_A << (sq % 8);
        let edges = ((RANK_1 | RANK_8) & !rank_bb) | ((FILE_A | FILE_H) & !file_bb);

        magic.mask = slider.empty_board(sq) & !edges;
        magic.offset = offset;

        // Carry-Rippler walk over every subset of the mask, starting from empty
        let mut b = 0u64;
        let mut size = 0usize;
        loop {
            table[magic.index(b)] = Bitboard(sliding_attack(slider.dirs(), sq, b));
            size += 1;
            b = b.wrapping_sub(magic.mask) & magic.mask;
            if b == 0 {
                break;
            }
        }
        offset += size;
    }

    debug_assert_eq!(offset - base, slider.table_size());
    magics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pext_scalar() {
        assert_eq!(pext_scalar(0, 0xFF), 0);
        assert_eq!(pext_scalar(0b1010_0000, 0b1111_0000), 0b1010);
        // scattered mask bits compress in order
        assert_eq!(pext_scalar((1 << 3) | (1 << 40), (1 << 3) | (1 << 20) | (1 << 40)), 0b101);
    }

    #[test]
    fn test_pext_matches_scalar() {
        let mask = 0x0001_0101_0101_017Eu64;
        for occ in [0u64, !0, 0x1234_5678_9ABC_DEF0, 0x0000_0100_0000_0010] {
            assert_eq!(pext(occ, mask), pext_scalar(occ, mask));
        }
    }

    #[test]
    fn test_rook_mask_excludes_edges() {
        let mut table = vec![Bitboard::EMPTY; ROOK_TABLE_SIZE];
        let magics = init_slider(Slider::Rook, &mut table, 0);
        // a1 rook: a2..a7 and b1..g1
        assert_eq!(magics[0].mask, 0x0001_0101_0101_017E);
        assert_eq!(magics[0].mask.count_ones(), 12);
        // d4 rook has 10 relevant bits
        assert_eq!(magics[27].mask.count_ones(), 10);
    }

    #[test]
    fn test_table_sizes_fill_exactly() {
        let mut rooks = vec![Bitboard::EMPTY; ROOK_TABLE_SIZE];
        let rook_magics = init_slider(Slider::Rook, &mut rooks, 0);
        let rook_entries: usize = rook_magics.iter().map(|m| 1usize << m.mask.count_ones()).sum();
        assert_eq!(rook_entries, ROOK_TABLE_SIZE);

        let mut bishops = vec![Bitboard::EMPTY; BISHOP_TABLE_SIZE];
        let bishop_magics = init_slider(Slider::Bishop, &mut bishops, 0);
        let bishop_entries: usize = bishop_magics
            .iter()
            .map(|m| 1usize << m.mask.count_ones())
            .sum();
        assert_eq!(bishop_entries, BISHOP_TABLE_SIZE);
    }
}
