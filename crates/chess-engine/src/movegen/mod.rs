//! Move generation.
//!
//! Candidates are produced per piece from the mailbox board and kept only if
//! applying them leaves the mover's king out of check.

pub mod perft;

use chess_core::{Color, Move, MoveFlag, Piece, PieceKind, Square};
use serde::Deserialize;
use tracing::trace;

use crate::attacks::{slider_directions, KING_OFFSETS, KNIGHT_OFFSETS};
use crate::Board;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Returns the first move landing on `target`.
    ///
    /// Promotions put four moves on the same target; the queen promotion
    /// comes first.
    pub fn find_target(&self, target: Square) -> Option<Move> {
        self.iter().copied().find(|m| m.target() == target)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Which squares must be unattacked for the king to castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CastlingCheck {
    /// The king's square and the square it crosses. The landing square is
    /// covered by the legality filter.
    #[default]
    Path,
    /// Only the king's square, which lets the king castle through an
    /// attacked square.
    KingSquareOnly,
}

/// Legal move generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveGenerator {
    castling: CastlingCheck,
}

impl MoveGenerator {
    pub const fn new(castling: CastlingCheck) -> Self {
        MoveGenerator { castling }
    }

    pub const fn castling_check(&self) -> CastlingCheck {
        self.castling
    }

    /// Generates the legal moves of the piece on `sq`.
    ///
    /// The list is empty when the square is empty or holds a piece of the
    /// side not to move. The board is borrowed mutably to test each
    /// candidate and is left exactly as it was found.
    pub fn generate_moves_of_piece(&self, board: &mut Board, sq: Square) -> MoveList {
        let mut legal = MoveList::new();
        let us = board.side_to_move();
        let piece = board.piece_at(sq);
        if !piece.is_color(us) {
            return legal;
        }

        let mut candidates = MoveList::new();
        match piece.kind() {
            Some(PieceKind::Pawn) => pawn_candidates(board, sq, us, &mut candidates),
            Some(PieceKind::Knight) => step_candidates(board, sq, us, &KNIGHT_OFFSETS, &mut candidates),
            Some(PieceKind::King) => {
                step_candidates(board, sq, us, &KING_OFFSETS, &mut candidates);
                self.castling_candidates(board, sq, us, &mut candidates);
            }
            Some(kind) if kind.is_slider() => {
                slider_candidates(board, sq, us, kind, &mut candidates)
            }
            _ => {}
        }

        for &m in &candidates {
            if leaves_king_safe(board, m, us) {
                legal.push(m);
            }
        }
        legal
    }

    /// Generates the legal moves of every piece of the side to move.
    pub fn generate_moves(&self, board: &mut Board) -> MoveList {
        let mut moves = MoveList::new();
        let us = board.side_to_move();
        for sq in Square::all() {
            if board.piece_at(sq).is_color(us) {
                for &m in &self.generate_moves_of_piece(board, sq) {
                    moves.push(m);
                }
            }
        }
        moves
    }

    fn castling_candidates(&self, board: &Board, from: Square, us: Color, moves: &mut MoveList) {
        if Square::from_coords(us.back_rank(), 4) != Some(from) {
            return;
        }
        let rights = board.state().castling();
        let kingside = rights.can_castle_kingside(us);
        let queenside = rights.can_castle_queenside(us);
        if !kingside && !queenside {
            return;
        }

        // Can't castle out of check
        let them = us.opposite();
        if board.is_square_attacked(from, them) {
            return;
        }

        let rook = Piece::new(us, PieceKind::Rook);
        let holds = |df: i8, piece: Piece| from.offset(0, df).map_or(false, |s| board.piece_at(s) == piece);
        let crossable = |df: i8| {
            self.castling == CastlingCheck::KingSquareOnly
                || from
                    .offset(0, df)
                    .map_or(false, |s| !board.is_square_attacked(s, them))
        };

        if kingside && holds(3, rook) && holds(1, Piece::NONE) && holds(2, Piece::NONE) && crossable(1) {
            if let Some(target) = from.offset(0, 2) {
                moves.push(Move::with_flag(from, target, MoveFlag::KingSideCastle));
            }
        }

        if queenside
            && holds(-4, rook)
            && holds(-1, Piece::NONE)
            && holds(-2, Piece::NONE)
            && holds(-3, Piece::NONE)
            && crossable(-1)
        {
            if let Some(target) = from.offset(0, -2) {
                moves.push(Move::with_flag(from, target, MoveFlag::QueenSideCastle));
            }
        }
    }
}

/// Generates the legal moves of the piece on `sq` with the default generator.
pub fn generate_moves_of_piece(board: &mut Board, sq: Square) -> MoveList {
    MoveGenerator::default().generate_moves_of_piece(board, sq)
}

/// Generates all legal moves for the side to move with the default generator.
pub fn generate_moves(board: &mut Board) -> MoveList {
    MoveGenerator::default().generate_moves(board)
}

fn leaves_king_safe(board: &mut Board, m: Move, us: Color) -> bool {
    if board.make_move(m, true).is_err() {
        return false;
    }
    let safe = !board.in_check(us);
    board.unmake_move(m, true).is_ok() && safe
}

fn pawn_candidates(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    let them = us.opposite();
    let dir = us.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(dir, 0) {
        if board.piece_at(one).is_none() {
            push_pawn_move(from, one, us, moves);
            if from.rank() == us.pawn_rank() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.piece_at(two).is_none() {
                        moves.push(Move::with_flag(from, two, MoveFlag::PawnTwoUp));
                    }
                }
            }
        }
    }

    // Captures
    for df in [-1, 1] {
        if let Some(target) = from.offset(dir, df) {
            if board.piece_at(target).is_color(them) {
                push_pawn_move(from, target, us, moves);
            }
        }
    }

    // En passant
    let Some(ep_file) = board.state().en_passant_file() else {
        return;
    };
    if from.rank() != us.en_passant_rank() {
        return;
    }
    let enemy_pawn = Piece::new(them, PieceKind::Pawn);
    for df in [-1, 1] {
        let Some(beside) = from.offset(0, df) else {
            continue;
        };
        if beside.file() != ep_file || board.piece_at(beside) != enemy_pawn {
            continue;
        }
        if let Some(target) = from.offset(dir, df) {
            trace!(from = %from, to = %target, "en passant available");
            moves.push(Move::with_flag(from, target, MoveFlag::EnPassantCapture));
        }
    }
}

/// Pushes a pawn move, expanded into every promotion on the last rank.
fn push_pawn_move(from: Square, to: Square, us: Color, moves: &mut MoveList) {
    if to.rank() == us.promotion_rank() {
        for flag in MoveFlag::PROMOTIONS {
            moves.push(Move::with_flag(from, to, flag));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn step_candidates(board: &Board, from: Square, us: Color, offsets: &[(i8, i8)], moves: &mut MoveList) {
    for &(dr, df) in offsets {
        if let Some(to) = from.offset(dr, df) {
            if !board.piece_at(to).is_color(us) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

fn slider_candidates(board: &Board, from: Square, us: Color, kind: PieceKind, moves: &mut MoveList) {
    for &(dr, df) in slider_directions(kind) {
        let mut current = from;
        while let Some(to) = current.offset(dr, df) {
            let occupant = board.piece_at(to);
            if occupant.is_color(us) {
                break;
            }
            moves.push(Move::new(from, to));
            if !occupant.is_none() {
                break;
            }
            current = to;
        }
    }
}
