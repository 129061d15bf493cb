//! Attack patterns for all piece types.
//!
//! Every rule is decided from rank/file deltas between the attacker and the
//! target. Sliding pieces additionally need every square strictly between
//! the two to be empty.

use std::collections::BTreeSet;

use chess_core::{Color, Piece, PieceKind, Square};

/// (rank, file) steps to the eight neighbouring squares.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

/// (rank, file) steps of a knight.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Unit directions along ranks and files.
pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Unit directions along diagonals.
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns the unit directions a slider of `kind` moves along.
pub(crate) fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
        (0, 1),
        (0, -1),
        (1, 0),
        (-1, 0),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];
    match kind {
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        _ => &[],
    }
}

/// Returns true if the piece standing on `attacker` attacks `target`.
pub(crate) fn attacks(squares: &[Piece; 64], attacker: Square, target: Square) -> bool {
    let piece = squares[usize::from(attacker)];
    let Some(kind) = piece.kind() else {
        return false;
    };

    let d_rank = target.rank() as i8 - attacker.rank() as i8;
    let d_file = target.file() as i8 - attacker.file() as i8;

    match kind {
        PieceKind::Pawn => pawn_attacks(piece.color(), d_rank, d_file),
        PieceKind::King => king_attacks(d_rank, d_file),
        PieceKind::Knight => knight_attacks(d_rank, d_file),
        PieceKind::Rook => rook_line(d_rank, d_file) && clear_path(squares, attacker, target),
        PieceKind::Bishop => bishop_line(d_rank, d_file) && clear_path(squares, attacker, target),
        PieceKind::Queen => {
            (rook_line(d_rank, d_file) || bishop_line(d_rank, d_file))
                && clear_path(squares, attacker, target)
        }
    }
}

/// Adds every square the piece on `from` attacks or defends to `out`.
pub(crate) fn controlled_squares(squares: &[Piece; 64], from: Square, out: &mut BTreeSet<Square>) {
    let piece = squares[usize::from(from)];
    let Some(kind) = piece.kind() else {
        return;
    };

    if kind.is_slider() {
        for &(dr, df) in slider_directions(kind) {
            let mut current = from;
            while let Some(next) = current.offset(dr, df) {
                out.insert(next);
                if !squares[usize::from(next)].is_none() {
                    break;
                }
                current = next;
            }
        }
        return;
    }

    match kind {
        PieceKind::Pawn => {
            let dir = piece.color().pawn_direction();
            out.extend([-1, 1].into_iter().filter_map(|df| from.offset(dir, df)));
        }
        PieceKind::King => {
            out.extend(KING_OFFSETS.iter().filter_map(|&(dr, df)| from.offset(dr, df)));
        }
        PieceKind::Knight => {
            out.extend(KNIGHT_OFFSETS.iter().filter_map(|&(dr, df)| from.offset(dr, df)));
        }
        _ => {}
    }
}

#[inline]
fn pawn_attacks(color: Color, d_rank: i8, d_file: i8) -> bool {
    d_rank == color.pawn_direction() && d_file.abs() == 1
}

#[inline]
fn king_attacks(d_rank: i8, d_file: i8) -> bool {
    d_rank.abs().max(d_file.abs()) == 1
}

#[inline]
fn knight_attacks(d_rank: i8, d_file: i8) -> bool {
    matches!((d_rank.abs(), d_file.abs()), (2, 1) | (1, 2))
}

#[inline]
fn rook_line(d_rank: i8, d_file: i8) -> bool {
    (d_rank == 0) != (d_file == 0)
}

#[inline]
fn bishop_line(d_rank: i8, d_file: i8) -> bool {
    d_rank != 0 && d_rank.abs() == d_file.abs()
}

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// The two squares must share a rank, file or diagonal.
fn clear_path(squares: &[Piece; 64], from: Square, to: Square) -> bool {
    let step_rank = (to.rank() as i8 - from.rank() as i8).signum();
    let step_file = (to.file() as i8 - from.file() as i8).signum();

    let mut current = from;
    while let Some(next) = current.offset(step_rank, step_file) {
        if next == to {
            return true;
        }
        if !squares[usize::from(next)].is_none() {
            return false;
        }
        current = next;
    }
    false
}
