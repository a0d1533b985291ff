//! Pseudo-legal move generation.
//!
//! `generate_captures` and `generate_quiets` append to a caller-supplied
//! buffer. Everything emitted obeys piece movement rules but may leave the
//! mover's own king attacked; the caller filters that with
//! `Board::is_illegal` after `make_move`. Castling is the one exception and
//! is only emitted when fully legal, since its legality conditions are part
//! of the movement rule itself.

use crate::attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::tables::{PST, piece_value};
use crate::types::{Color, Move, MoveKind, MoveList, PieceKind, mirror};

const PROMOTION_ORDER: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Ordering score for a move, assigned at emission.
///
/// Positional delta from the phase-0 piece-square table (mirrored for
/// Black), plus the victim's static value minus the mover's kind index --
/// the latter breaks equal-victim ties toward the cheapest attacker.
pub fn move_value(b: &Board, mv: &Move) -> i32 {
    let (from, dest) = match mv.color {
        Color::White => (mv.from, mv.dest),
        Color::Black => (mirror(mv.from), mirror(mv.dest)),
    };
    let pst = &PST[mv.piece.idx()][0];
    let mut value = pst[dest as usize] - pst[from as usize];

    value += piece_value(b.kind_on(mv.dest)) - mv.piece.idx() as i32;
    value
}

#[inline]
fn push_move(
    b: &Board,
    list: &mut MoveList,
    from: u8,
    dest: u8,
    kind: MoveKind,
    promo: Option<PieceKind>,
    piece: PieceKind,
) {
    let mut mv = Move {
        from,
        dest,
        kind,
        promo,
        color: b.side,
        piece,
        score: 0,
    };
    mv.score = move_value(b, &mv);
    list.push(mv);
}

type ShiftFn = fn(Bitboard) -> Bitboard;

fn piece_attacks(kind: PieceKind, from: u8, occupied: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Knight => knight_attacks(from),
        PieceKind::Bishop => bishop_attacks(from, occupied),
        PieceKind::Rook => rook_attacks(from, occupied),
        PieceKind::Queen => queen_attacks(from, occupied),
        PieceKind::King => king_attacks(from),
        PieceKind::Pawn => Bitboard::EMPTY,
    }
}

/// Append all pseudo-legal non-captures for the side to move.
pub fn generate_quiets(b: &Board, list: &mut MoveList) {
    let us = b.side;
    let occupied = b.occupied();
    let empty = !occupied;

    gen_pawn_quiets(b, us, empty, list);

    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        let mut from_bb = b.pieces_of(us, kind);
        while let Some(from) = from_bb.pop_lsb() {
            let mut targets = piece_attacks(kind, from, occupied) & empty;
            while let Some(dest) = targets.pop_lsb() {
                push_move(b, list, from, dest, MoveKind::Quiet, None, kind);
            }
        }
    }

    gen_castling(b, us, empty, list);
}

/// Append all pseudo-legal captures (including en passant) for the side to
/// move.
pub fn generate_captures(b: &Board, list: &mut MoveList) {
    let us = b.side;
    let them = us.other();
    let occupied = b.occupied();
    let enemies = b.colors[them.idx()];

    gen_pawn_captures(b, us, enemies, list);

    for kind in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        let mut from_bb = b.pieces_of(us, kind);
        while let Some(from) = from_bb.pop_lsb() {
            let mut targets = piece_attacks(kind, from, occupied) & enemies;
            while let Some(dest) = targets.pop_lsb() {
                push_move(b, list, from, dest, MoveKind::Capture, None, kind);
            }
        }
    }
}

fn gen_pawn_quiets(b: &Board, us: Color, empty: Bitboard, list: &mut MoveList) {
    let pawns = b.pieces_of(us, PieceKind::Pawn);

    // start_rank feeds double pushes, last_rank is where pushes promote.
    let (push, start_rank, last_rank, back): (ShiftFn, Bitboard, Bitboard, i8) = match us {
        Color::White => (Bitboard::north, Bitboard::RANK_2, Bitboard::RANK_8, -8),
        Color::Black => (Bitboard::south, Bitboard::RANK_7, Bitboard::RANK_1, 8),
    };

    let singles = push(pawns) & empty;

    let mut quiet = singles & !last_rank;
    while let Some(dest) = quiet.pop_lsb() {
        let from = (dest as i8 + back) as u8;
        push_move(b, list, from, dest, MoveKind::Quiet, None, PieceKind::Pawn);
    }

    // Both the stepped-over square and the target must be empty.
    let mut doubles = push(push(pawns & start_rank) & empty) & empty;
    while let Some(dest) = doubles.pop_lsb() {
        let from = (dest as i8 + 2 * back) as u8;
        push_move(
            b,
            list,
            from,
            dest,
            MoveKind::DoublePush,
            None,
            PieceKind::Pawn,
        );
    }

    let mut promos = singles & last_rank;
    while let Some(dest) = promos.pop_lsb() {
        let from = (dest as i8 + back) as u8;
        for promo in PROMOTION_ORDER {
            push_move(
                b,
                list,
                from,
                dest,
                MoveKind::Promotion,
                Some(promo),
                PieceKind::Pawn,
            );
        }
    }
}

fn gen_pawn_captures(b: &Board, us: Color, enemies: Bitboard, list: &mut MoveList) {
    let pawns = b.pieces_of(us, PieceKind::Pawn);

    let (west, east, back_west, back_east, last_rank): (ShiftFn, ShiftFn, i8, i8, Bitboard) =
        match us {
            Color::White => (
                Bitboard::north_west,
                Bitboard::north_east,
                -7,
                -9,
                Bitboard::RANK_8,
            ),
            Color::Black => (
                Bitboard::south_west,
                Bitboard::south_east,
                9,
                7,
                Bitboard::RANK_1,
            ),
        };

    for (shift, back) in [(west, back_west), (east, back_east)] {
        let hits = shift(pawns) & enemies;

        let mut plain = hits & !last_rank;
        while let Some(dest) = plain.pop_lsb() {
            let from = (dest as i8 + back) as u8;
            push_move(b, list, from, dest, MoveKind::Capture, None, PieceKind::Pawn);
        }

        let mut promos = hits & last_rank;
        while let Some(dest) = promos.pop_lsb() {
            let from = (dest as i8 + back) as u8;
            for promo in PROMOTION_ORDER {
                push_move(
                    b,
                    list,
                    from,
                    dest,
                    MoveKind::CapturePromotion,
                    Some(promo),
                    PieceKind::Pawn,
                );
            }
        }
    }

    if let Some(ep) = b.ep {
        // Every friendly pawn that would be attacked by an enemy pawn
        // standing on the ep square can capture onto it.
        let mut attackers = pawn_attacks(us.other(), ep) & pawns;
        while let Some(from) = attackers.pop_lsb() {
            push_move(b, list, from, ep, MoveKind::EnPassant, None, PieceKind::Pawn);
        }
    }
}

fn gen_castling(b: &Board, us: Color, empty: Bitboard, list: &mut MoveList) {
    // Castling out of check is never legal.
    if b.in_check() {
        return;
    }
    let Some(from) = b.king_sq(us) else {
        return;
    };
    let them = us.other();

    if b.castle.king_side(us)
        && empty.contains(from + 1)
        && empty.contains(from + 2)
        && !b.is_attacked(them, from + 1)
        && !b.is_attacked(them, from + 2)
    {
        push_move(
            b,
            list,
            from,
            from + 2,
            MoveKind::Castle,
            None,
            PieceKind::King,
        );
    }

    if b.castle.queen_side(us)
        && empty.contains(from - 1)
        && empty.contains(from - 2)
        && empty.contains(from - 3)
        && !b.is_attacked(them, from - 1)
        && !b.is_attacked(them, from - 2)
    {
        push_move(
            b,
            list,
            from,
            from - 2,
            MoveKind::Castle,
            None,
            PieceKind::King,
        );
    }
}

/// All legal moves, allocated fresh. Used by the UCI surface and tests; the
/// search filters legality itself via make/unmake.
pub fn legal_moves(b: &Board) -> Vec<Move> {
    let mut tmp = b.clone();
    let mut list = MoveList::new();
    generate_captures(&tmp, &mut list);
    generate_quiets(&tmp, &mut list);

    let mut out = Vec::with_capacity(list.len());
    for mv in list.iter() {
        let undo = tmp.make_move(mv);
        if !tmp.is_illegal() {
            out.push(mv);
        }
        tmp.unmake_move(mv, undo);
    }
    out
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
