//! Forsyth-Edwards Notation parsing and printing.
//!
//! The parser accepts 4-field EPD-style strings as well as full 6-field
//! FENs, defaulting the clocks. All validation lives here; the rest of the
//! crate trusts its boards.

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::board::{Board, Castling};
use crate::types::{Color, PieceKind, coord_to_sq, file_of, rank_of, sq};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 whitespace-separated fields, found {0}")]
    MissingFields(usize),
    #[error("board field must describe 8 ranks, found {0}")]
    BadRankCount(usize),
    #[error("rank '{0}' does not describe exactly 8 files")]
    BadRank(String),
    #[error("invalid piece character '{0}'")]
    BadPiece(char),
    #[error("invalid side to move '{0}'")]
    BadSideToMove(String),
    #[error("invalid castling character '{0}'")]
    BadCastling(char),
    #[error("invalid en-passant square '{0}'")]
    BadEnPassant(String),
    #[error("invalid clock field '{0}'")]
    BadClock(String),
}

fn parse_piece(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    Some((color, kind))
}

fn piece_char(color: Color, kind: PieceKind) -> char {
    let ch = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match color {
        Color::White => ch.to_ascii_uppercase(),
        Color::Black => ch,
    }
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::MissingFields(fields.len()));
        }

        let mut pieces = [Bitboard::EMPTY; 6];
        let mut colors = [Bitboard::EMPTY; 2];

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 first
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let (color, kind) = parse_piece(ch).ok_or(FenError::BadPiece(ch))?;
                    let square =
                        sq(file, rank).ok_or_else(|| FenError::BadRank(rank_str.to_string()))?;
                    pieces[kind.idx()].set(square);
                    colors[color.idx()].set(square);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::BadRank(rank_str.to_string()));
                }
            }
            if file != 8 {
                return Err(FenError::BadRank(rank_str.to_string()));
            }
        }

        let side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        let mut castle = Castling::NONE;
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                let bits = match ch {
                    'K' => Castling::WHITE_KING,
                    'Q' => Castling::WHITE_QUEEN,
                    'k' => Castling::BLACK_KING,
                    'q' => Castling::BLACK_QUEEN,
                    _ => return Err(FenError::BadCastling(ch)),
                };
                castle.grant(bits);
            }
        }

        let ep = if fields[3] == "-" {
            None
        } else {
            Some(coord_to_sq(fields[3]).ok_or_else(|| FenError::BadEnPassant(fields[3].to_string()))?)
        };

        let halfmove_part = fields.get(4).copied().unwrap_or("0");
        let halfmove_clock = halfmove_part
            .parse()
            .map_err(|_| FenError::BadClock(halfmove_part.to_string()))?;
        let fullmove_part = fields.get(5).copied().unwrap_or("1");
        let fullmove_number = fullmove_part
            .parse()
            .map_err(|_| FenError::BadClock(fullmove_part.to_string()))?;

        Ok(Board {
            pieces,
            colors,
            side,
            castle,
            ep,
            halfmove_clock,
            fullmove_number,
        })
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let square = (rank * 8 + file) as u8;
                match (self.kind_on(square), self.color_on(square)) {
                    (Some(kind), Some(color)) => {
                        if empty > 0 {
                            out.push(char::from_digit(empty, 10).unwrap());
                            empty = 0;
                        }
                        out.push(piece_char(color, kind));
                    }
                    _ => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from_digit(empty, 10).unwrap());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castle == Castling::NONE {
            out.push('-');
        } else {
            for (bits, ch) in [
                (Castling::WHITE_KING, 'K'),
                (Castling::WHITE_QUEEN, 'Q'),
                (Castling::BLACK_KING, 'k'),
                (Castling::BLACK_QUEEN, 'q'),
            ] {
                if self.castle.0 & bits != 0 {
                    out.push(ch);
                }
            }
        }

        out.push(' ');
        match self.ep {
            Some(ep) => {
                out.push((b'a' + file_of(ep) as u8) as char);
                out.push((b'1' + rank_of(ep) as u8) as char);
            }
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";

    #[test]
    fn test_startpos_round_trip() {
        let b = Board::from_fen(STARTPOS).unwrap();
        assert_eq!(b, Board::startpos());
        assert_eq!(b.to_fen(), STARTPOS);
    }

    #[test]
    fn test_four_field_fen_defaults_clocks() {
        let b = Board::from_fen(KIWIPETE).unwrap();
        assert_eq!(b.halfmove_clock, 0);
        assert_eq!(b.fullmove_number, 1);
        assert_eq!(b.side, Color::White);
        assert_eq!(b.castle, Castling::ALL);
    }

    #[test]
    fn test_en_passant_field() {
        let b =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(b.ep, Some(20)); // e3
        assert!(b.to_fen().contains(" e3 "));
    }

    #[test]
    fn test_errors() {
        assert_eq!(Board::from_fen("8/8/8 w - -").unwrap_err(), FenError::BadRankCount(3));
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 x - -").unwrap_err(),
            FenError::BadSideToMove("x".to_string())
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/7z w - -").unwrap_err(),
            FenError::BadPiece('z')
        );
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - e9").unwrap_err(),
            FenError::BadEnPassant("e9".to_string())
        );
        assert!(Board::from_fen("8/8/8/8").is_err());
    }

    #[test]
    fn test_piece_placement() {
        let b = Board::from_fen(KIWIPETE).unwrap();
        assert_eq!(b.kind_on(4), Some(PieceKind::King)); // e1
        assert_eq!(b.color_on(4), Some(Color::White));
        assert_eq!(b.kind_on(52), Some(PieceKind::Queen)); // e7
        assert_eq!(b.color_on(52), Some(Color::Black));
        assert_eq!(b.pieces_of(Color::White, PieceKind::Pawn).popcount(), 8);
        assert_eq!(b.pieces_of(Color::Black, PieceKind::Pawn).popcount(), 8);
    }
}
