//! Property-based tests using proptest.

use crate::board::{Color, GenType, Move, Position, Square};
use proptest::prelude::*;

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play `num_moves` random legal moves, stopping early at mate or stalemate.
fn random_playout(pos: &mut Position, seed: u64, num_moves: usize) -> Vec<Move> {
    use rand::prelude::*;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut history = Vec::new();
    for _ in 0..num_moves {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
        pos.make_move(mv);
        history.push(mv);
    }
    history
}

proptest! {
    /// Property: make_move followed by unmake_move restores the position exactly
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::new();
        let initial = pos.clone();
        let initial_fen = pos.as_fen();

        let mut history = random_playout(&mut pos, seed, num_moves);
        while let Some(mv) = history.pop() {
            pos.unmake_move(mv);
        }

        prop_assert_eq!(pos.as_fen(), initial_fen);
        prop_assert!(pos == initial);
    }

    /// Property: FEN round-trip preserves the position
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::new();
        random_playout(&mut pos, seed, num_moves);

        let fen = pos.as_fen();
        let restored = Position::try_from_fen(&fen).unwrap();

        prop_assert_eq!(restored.as_fen(), fen);
        prop_assert_eq!(restored.side_to_move(), pos.side_to_move());
        prop_assert_eq!(restored.castling_rights(), pos.castling_rights());
        prop_assert_eq!(restored.ep_square(), pos.ep_square());
        prop_assert_eq!(restored.checkers(), pos.checkers());
        prop_assert_eq!(restored.legal_moves().len(), pos.legal_moves().len());
    }

    /// Property: legal moves never leave the mover's king attacked
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), num_moves in 0..20usize) {
        let mut pos = Position::new();
        random_playout(&mut pos, seed, num_moves);

        let us = pos.side_to_move();
        for mv in pos.legal_moves() {
            pos.make_move(mv);
            let ksq = pos.king_square(us);
            prop_assert!((pos.attackers_to(ksq) & pos.pieces_by_color(!us)).is_empty(),
                "Legal move left king in check: {:?}", mv);
            pos.unmake_move(mv);
        }
    }

    /// Property: the legal list is the pseudo-legal list filtered by `legal()`
    #[test]
    fn prop_legal_is_filtered_pseudo_legal(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::new();
        random_playout(&mut pos, seed, num_moves);

        let gen = if pos.in_check() { GenType::Evasions } else { GenType::NonEvasions };
        let pseudo = pos.generate(gen);
        let legal = pos.legal_moves();

        let filtered = pseudo.iter().filter(|&&m| pos.legal(m)).count();
        prop_assert_eq!(filtered, legal.len());
        for mv in legal.iter() {
            prop_assert!(pseudo.contains(*mv));
        }
    }

    /// Property: every square of the placement agrees with the bitboards
    #[test]
    fn prop_placement_consistent(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut pos = Position::new();
        random_playout(&mut pos, seed, num_moves);

        for sq in Square::all() {
            match pos.piece_on(sq) {
                Some(piece) => {
                    prop_assert!(pos.pieces_of(piece.color(), piece.piece_type()).contains(sq));
                    prop_assert!(!pos.pieces_by_color(!piece.color()).contains(sq));
                }
                None => prop_assert!(!pos.pieces().contains(sq)),
            }
        }
        prop_assert_eq!(
            pos.pieces(),
            pos.pieces_by_color(Color::White) | pos.pieces_by_color(Color::Black)
        );
    }
}
