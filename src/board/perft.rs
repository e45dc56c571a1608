use super::position::Position;
use super::types::Move;

impl Position {
    /// Count the leaf nodes of the legal move tree `depth` plies deep.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for m in moves {
            self.make_move(m);
            nodes += self.perft(depth - 1);
            self.unmake_move(m);
        }

        nodes
    }

    /// Perft split by root move, in generation order.
    ///
    /// At depth 0 the list is empty.
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }

        let moves = self.legal_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for m in moves {
            self.make_move(m);
            counts.push((m, self.perft(depth - 1)));
            self.unmake_move(m);
        }

        counts
    }
}
