use std::fmt;

use super::position::Position;
use super::types::Square;

const SEPARATOR: &str = "  +---+---+---+---+---+---+---+---+";

impl fmt::Display for Position {
    /// Boxed board with White at the bottom, followed by the FEN and the
    /// squares of any checking pieces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SEPARATOR}")?;
        for rank in (0..8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8 {
                let sq = Square::from_index(rank * 8 + file);
                let ch = self.piece_on(sq).map_or(' ', |p| p.to_fen_char());
                write!(f, " {ch} |")?;
            }
            writeln!(f)?;
            writeln!(f, "{SEPARATOR}")?;
        }
        writeln!(f, "    a   b   c   d   e   f   g   h")?;
        writeln!(f)?;
        writeln!(f, "Fen: {}", self.as_fen())?;

        write!(f, "Checkers:")?;
        for sq in self.checkers() {
            write!(f, " {sq}")?;
        }
        writeln!(f)
    }
}
