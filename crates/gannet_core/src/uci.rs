//! UCI move encoding and `position` command handling.

use crate::board::Board;
use crate::movegen::legal_moves;
use crate::types::{Move, PieceKind, coord_to_sq, sq_to_coord};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::new();
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.dest));
    if let Some(p) = mv.promo {
        let ch = match p {
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => 'q',
        };
        s.push(ch);
    }
    s
}

/// Parse a long-algebraic move and match it against the legal moves of the
/// position, so castle/en-passant/promotion flags come out right.
pub fn parse_uci_move(b: &Board, txt: &str) -> Option<Move> {
    if txt.len() < 4 {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let dest = coord_to_sq(&txt[2..4])?;
    let promo = if txt.len() >= 5 {
        match txt.as_bytes()[4] as char {
            'q' | 'Q' => Some(PieceKind::Queen),
            'r' | 'R' => Some(PieceKind::Rook),
            'b' | 'B' => Some(PieceKind::Bishop),
            'n' | 'N' => Some(PieceKind::Knight),
            _ => None,
        }
    } else {
        None
    };

    legal_moves(b)
        .into_iter()
        .find(|m| m.from == from && m.dest == dest && m.promo == promo)
}

/// Handle the tail of a `position` command: `startpos`, `fen ...`, each
/// optionally followed by `moves ...`. Unparseable input resets to the
/// starting position; unknown moves are skipped.
pub fn set_position_from_uci(b: &mut Board, args: &[&str]) {
    let mut i = 0;
    match args.first() {
        Some(&"fen") => {
            let end = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
            let fen = args[1..end].join(" ");
            *b = Board::from_fen(&fen).unwrap_or_else(|_| Board::startpos());
            i = end;
        }
        _ => {
            // "startpos" or anything unrecognized
            *b = Board::startpos();
            i += 1;
        }
    }

    if args.get(i) == Some(&"moves") {
        for txt in &args[i + 1..] {
            if let Some(mv) = parse_uci_move(b, txt) {
                b.make_move(mv);
            }
        }
    }
}
