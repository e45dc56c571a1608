use std::str::FromStr;
use std::sync::Arc;

use super::attack_tables::{self, AttackTables};
use super::error::{FenError, MoveParseError};
use super::position::Position;
use super::types::{CastlingRights, Color, Move, Piece, PieceType, Square};

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from FEN notation using the shared attack tables.
    ///
    /// The half-move clock and full-move number may be omitted; they default
    /// to 0 and 1.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        Self::try_from_fen_with_tables(fen, attack_tables::shared())
    }

    /// Parse a position from FEN notation with an explicit table instance.
    pub fn try_from_fen_with_tables(
        fen: &str,
        tables: Arc<AttackTables>,
    ) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let mut pos = Position::empty(tables);
        pos.parse_placement(fields[0])?;

        for color in Color::BOTH {
            match pos.pieces_of(color, PieceType::King).popcount() {
                0 => return Err(FenError::MissingKing { color }),
                1 => {}
                count => return Err(FenError::TooManyKings { color, count }),
            }
        }

        pos.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let castling = parse_castling(fields[2])?;
        let ep_square = match fields[3] {
            "-" => None,
            s => Some(
                s.parse::<Square>()
                    .map_err(|_| FenError::InvalidEnPassant {
                        found: s.to_string(),
                    })?,
            ),
        };

        let rule50 = parse_clock(fields.get(4).copied(), 0)?;
        let fullmove = parse_clock(fields.get(5).copied(), 1)?;
        let black_to_move = (pos.side_to_move == Color::Black) as u32;
        pos.game_ply = fullmove
            .saturating_sub(1)
            .checked_mul(2)
            .and_then(|ply| ply.checked_add(black_to_move))
            .ok_or_else(|| FenError::InvalidClock {
                found: fields.get(5).copied().unwrap_or_default().to_string(),
            })?;

        let castling = pos.sanitize_castling(castling);
        let ep_square = ep_square.filter(|&sq| pos.ep_square_usable(sq));

        let st = pos.state_mut();
        st.castling_rights = castling;
        st.ep_square = ep_square;
        st.rule50 = rule50;
        pos.set_check_info();

        let us = pos.side_to_move;
        if (pos.attackers_to(pos.king_square(!us)) & pos.pieces_by_color(us)).any() {
            return Err(FenError::OpponentInCheck { color: !us });
        }
        Ok(pos)
    }

    fn parse_placement(&mut self, placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    let sq = Square::new(rank, file).ok_or(FenError::TooManyFiles {
                        rank: rank + 1,
                        files: file + 1,
                    })?;
                    self.put_piece(piece, sq);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::TooManyFiles {
                        rank: rank + 1,
                        files: file,
                    });
                }
            }
            if file < 8 {
                return Err(FenError::TooFewFiles {
                    rank: rank + 1,
                    files: file,
                });
            }
        }
        Ok(())
    }

    /// Drop castling rights whose king or rook is not on its home square.
    fn sanitize_castling(&self, rights: CastlingRights) -> CastlingRights {
        let mut kept = rights;
        for right in CastlingRights::SINGLES {
            if !rights.has(right) {
                continue;
            }
            let (color, _) = right.side();
            let king_home = Square::E1.relative(color);
            let in_place = self.piece_on(king_home) == Some(Piece::new(color, PieceType::King))
                && self.piece_on(right.rook_square()) == Some(Piece::new(color, PieceType::Rook));
            if !in_place {
                #[cfg(feature = "logging")]
                log::debug!("dropping castling right {right}: king or rook not at home");
                kept.remove(right);
            }
        }
        kept
    }

    /// An en passant square is kept only when it is the empty square crossed
    /// by an enemy double push and a pawn of the side to move attacks it.
    fn ep_square_usable(&self, sq: Square) -> bool {
        let us = self.side_to_move;
        if sq.relative_rank(us) != 5 {
            return false;
        }
        let pushed_from = sq.offset(us.pawn_push());
        let pushed_to = sq.offset(-us.pawn_push());
        let usable = self.is_empty(sq)
            && self.is_empty(pushed_from)
            && self.piece_on(pushed_to) == Some(Piece::new(!us, PieceType::Pawn))
            && (self.tables.pawn_attacks(!us, sq) & self.pieces_of(us, PieceType::Pawn)).any();
        #[cfg(feature = "logging")]
        if !usable {
            log::debug!("dropping en passant square {sq}: no double push to capture");
        }
        usable
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn as_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self
            .ep_square()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            self.castling_rights(),
            ep,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }

    /// Parse a move in UCI long algebraic notation (e.g., "e2e4", "e7e8q").
    ///
    /// Castling is accepted both as king takes rook (`e1h1`) and as the king's
    /// two-square step (`e1g1`).
    ///
    /// # Example
    /// ```
    /// use chess_rules::board::Position;
    ///
    /// let pos = Position::new();
    /// let mv = pos.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        if !(4..=5).contains(&uci.len()) || !uci.is_ascii() {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: uci.to_string(),
        };
        let from: Square = uci[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = uci[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match uci[4..].chars().next() {
            Some(c) => match PieceType::from_char(c) {
                Some(pt) if PieceType::PROMOTIONS.contains(&pt) => Some(pt),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| {
                mv.from() == from
                    && mv.promotion_type() == promotion
                    && (mv.to() == to || (mv.is_castling() && castling_king_target(*mv) == to))
            })
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse a UCI move and make it on the board in one call.
    ///
    /// # Example
    /// ```
    /// use chess_rules::board::Position;
    ///
    /// let mut pos = Position::new();
    /// pos.make_move_uci("e2e4").unwrap();
    /// pos.make_move_uci("e7e5").unwrap();
    /// assert_eq!(pos.fullmove_number(), 2);
    /// ```
    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.make_move(mv);
        Ok(mv)
    }
}

/// Square the king lands on for a castling move
fn castling_king_target(mv: Move) -> Square {
    let file = if mv.to() > mv.from() { 6 } else { 2 };
    Square::from_index(mv.from().rank() * 8 + file)
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let right = match c {
            'K' => CastlingRights::WHITE_KINGSIDE,
            'Q' => CastlingRights::WHITE_QUEENSIDE,
            'k' => CastlingRights::BLACK_KINGSIDE,
            'q' => CastlingRights::BLACK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastling { char: c }),
        };
        rights.insert(right);
    }
    Ok(rights)
}

fn parse_clock(field: Option<&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| FenError::InvalidClock {
            found: s.to_string(),
        }),
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_round_trip() {
        let pos = Position::try_from_fen(START_FEN).unwrap();
        assert_eq!(pos.as_fen(), START_FEN);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn test_fen_black_to_move() {
        let fen = "rnbqkbnr/pppp1ppp/8/8/3pP3/8/PPP2PPP/RNBQKBNR b KQkq e3 0 3";
        let pos = Position::try_from_fen(fen).unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.ep_square(), Some(Square::E3));
        assert_eq!(pos.game_ply(), 5);
        assert_eq!(pos.as_fen(), fen);
    }

    #[test]
    fn test_fen_optional_clocks() {
        let pos = Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(pos.as_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn test_fen_error_field_count() {
        let result = Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert_eq!(result, Err(FenError::WrongFieldCount { found: 2 }));
    }

    #[test]
    fn test_fen_error_rank_count() {
        let result = Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(result, Err(FenError::WrongRankCount { found: 7 }));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result =
            Position::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: 'x' })));
    }

    #[test]
    fn test_fen_error_file_counts() {
        let result =
            Position::try_from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: '9' })));
        let result =
            Position::try_from_fen("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::TooManyFiles { rank: 8, .. })));
        let result =
            Position::try_from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(result, Err(FenError::TooFewFiles { rank: 7, files: 7 }));
    }

    #[test]
    fn test_fen_error_invalid_side_to_move() {
        let result =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_fen_error_invalid_castling() {
        let result =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { char: 'X' })));
    }

    #[test]
    fn test_fen_error_invalid_en_passant() {
        let result =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn test_fen_error_clock_and_kings() {
        let result = Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1");
        assert!(matches!(result, Err(FenError::InvalidClock { .. })));
        let result = Position::try_from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(result, Err(FenError::MissingKing { color: Color::Black }));
        let result = Position::try_from_fen("k7/8/8/8/8/8/8/4KK2 w - - 0 1");
        assert_eq!(
            result,
            Err(FenError::TooManyKings {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn test_fen_partial_castling() {
        let pos = Position::try_from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1",
        )
        .unwrap();
        assert!(pos.can_castle(CastlingRights::WHITE_KINGSIDE));
        assert!(!pos.can_castle(CastlingRights::WHITE_QUEENSIDE));
        assert!(!pos.can_castle(CastlingRights::BLACK_KINGSIDE));
        assert!(pos.can_castle(CastlingRights::BLACK_QUEENSIDE));
    }

    #[test]
    fn test_fen_normalises_castling_and_ep() {
        // no rook on h1, and no black pawn next to e4
        let pos = Position::try_from_fen("r3k2r/8/8/8/4P3/8/8/R3K3 b KQkq e3 0 1").unwrap();
        assert_eq!(pos.castling_rights().to_string(), "Qkq");
        assert_eq!(pos.ep_square(), None);
        assert_eq!(pos.as_fen(), "r3k2r/8/8/8/4P3/8/8/R3K3 b Qkq - 0 1");
    }

    #[test]
    fn test_fen_drops_ep_square_without_double_push() {
        // d6 is occupied by a knight, so no pawn could have crossed it
        let fen = "4k3/8/3n4/4P3/8/8/8/4K3 w - d6 0 1";
        let mut pos = Position::try_from_fen(fen).unwrap();
        assert_eq!(pos.ep_square(), None);
        assert_eq!(pos.as_fen(), "4k3/8/3n4/4P3/8/8/8/4K3 w - - 0 1");
        assert!(pos.legal_moves().iter().all(|m| !m.is_en_passant()));
        assert!(pos.make_move_uci("e5d6").is_ok());

        // no black pawn on d5
        let pos = Position::try_from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(pos.ep_square(), None);

        // d7 is still occupied, so the pawn did not come from there
        let pos = Position::try_from_fen("4k3/3p4/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(pos.ep_square(), None);

        let pos = Position::try_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(pos.ep_square(), Some(Square::D6));
    }

    #[test]
    fn test_fen_rejects_opponent_in_check() {
        let result = Position::try_from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1");
        assert_eq!(
            result,
            Err(FenError::OpponentInCheck {
                color: Color::Black
            })
        );
        let result = Position::try_from_fen("4k3/8/8/8/8/8/3p4/4K3 b - - 0 1");
        assert_eq!(
            result,
            Err(FenError::OpponentInCheck {
                color: Color::White
            })
        );
    }

    #[test]
    fn test_fen_move_number_overflow() {
        let result = Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 4000000000");
        assert!(matches!(result, Err(FenError::InvalidClock { .. })));

        let mut pos = Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 b - - 4294967295 2147483648").unwrap();
        assert_eq!(pos.fullmove_number(), 2147483648);
        let mv = pos.make_move_uci("e8d8").unwrap();
        assert_eq!(pos.halfmove_clock(), u32::MAX);
        pos.unmake_move(mv);
        assert_eq!(pos.as_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 4294967295 2147483648");
    }

    #[test]
    fn test_fen_accepted_positions_are_playable() {
        for fen in [
            "4k3/8/3n4/4P3/8/8/8/4K3 w - d6 0 1",
            "4k3/3p4/8/3pP3/8/8/8/4K3 w - d6 0 1",
            "r3k2r/8/8/8/4P3/8/8/R3K3 b KQkq e3 0 1",
            "4k3/8/8/8/8/8/8/4K3 b - - 0 2147483648",
        ] {
            let mut pos = Position::try_from_fen(fen).unwrap();
            let before = pos.as_fen();
            assert!(pos.perft(3) > 0, "{fen}");
            assert_eq!(pos.as_fen(), before, "{fen}");
        }
    }

    #[test]
    fn test_parse_move_e2e4() {
        let pos = Position::new();
        let mv = pos.parse_move("e2e4").unwrap();
        assert_eq!(mv.from(), Square::E2);
        assert_eq!(mv.to(), Square::E4);
    }

    #[test]
    fn test_parse_move_promotion() {
        let pos = Position::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        let mv = pos.parse_move("a7a8n").unwrap();
        assert_eq!(mv.promotion_type(), Some(PieceType::Knight));
    }

    #[test]
    fn test_parse_move_castling_spellings() {
        let pos = Position::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let rook_form = pos.parse_move("e1h1").unwrap();
        let king_form = pos.parse_move("e1g1").unwrap();
        assert_eq!(rook_form, king_form);
        assert_eq!(rook_form, Move::castling(Square::E1, Square::H1));
        assert_eq!(pos.parse_move("e1c1").unwrap(), Move::castling(Square::E1, Square::A1));
    }

    #[test]
    fn test_parse_move_errors() {
        let pos = Position::new();
        assert!(matches!(
            pos.parse_move("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        ));
        assert!(matches!(
            pos.parse_move("z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            pos.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));
        let promo = Position::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        assert!(matches!(
            promo.parse_move("a7a8k"),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        ));
    }

    #[test]
    fn test_from_str_trait() {
        let pos: Position = START_FEN.parse().unwrap();
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn test_make_move_uci() {
        let mut pos = Position::new();
        pos.make_move_uci("e2e4").unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        // no black pawn can take on e3, so no en passant square is recorded
        assert_eq!(
            pos.as_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }
}
