//! Mailbox board with a reversible make/unmake protocol.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Index;

use chess_core::{Color, FenError, FenParser, Move, MoveFlag, Piece, PieceKind, Square};
use tracing::{debug, trace, warn};

use crate::attacks;
use crate::{BoardError, CastlingRights, GameState};

/// The 64 board cells plus the stack of game-state snapshots.
///
/// The history is never empty: its bottom entry describes the loaded
/// position and every applied move pushes one more snapshot on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Piece; 64],
    history: Vec<GameState>,
    /// Fullmove number of the loaded position.
    first_fullmove: u32,
}

impl Board {
    /// Creates an empty board with White to move and every castling right.
    pub fn new() -> Self {
        Board {
            squares: [Piece::NONE; 64],
            history: vec![GameState::initial()],
            first_fullmove: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_placement(FenParser::STARTPOS_PLACEMENT)
    }

    /// Creates a board from a piece-placement string, see [`load_board`](Board::load_board).
    pub fn from_placement(text: &str) -> Self {
        let mut board = Self::new();
        board.load_board(text);
        board
    }

    /// Replaces the whole position with the placement described by `text`.
    ///
    /// Parsing is best-effort: `/` moves to the next rank, a digit skips that
    /// many files, and any other character places the piece it names (an
    /// unknown character leaves its cell empty) before advancing one file.
    /// Parsing stops at the first character that would land beyond rank or
    /// file 7, so any fields after the placement are ignored.
    ///
    /// The history is reset to the initial state: White to move, all castling
    /// rights, no en passant file, a zero halfmove clock. Use
    /// [`from_fen`](Board::from_fen) to honour the remaining FEN fields.
    pub fn load_board(&mut self, text: &str) {
        let mut squares = [Piece::NONE; 64];
        let mut rank = 0usize;
        let mut file = 0usize;

        for (i, c) in text.char_indices() {
            if c == '/' {
                rank += 1;
                file = 0;
                continue;
            }
            if let Some(skip) = c.to_digit(10) {
                file = file.saturating_add(skip as usize);
                continue;
            }
            if rank > 7 || file > 7 {
                debug!(
                    consumed = i,
                    ignored = &text[i..],
                    "piece placement ended early"
                );
                break;
            }
            squares[rank * 8 + file] = Piece::from_symbol(c);
            file += 1;
        }

        self.squares = squares;
        self.history.clear();
        self.history.push(GameState::initial());
        self.first_fullmove = 1;
        debug!(placement = %self.placement(), "loaded board");
    }

    /// Creates a board from a complete FEN record.
    ///
    /// Unlike [`load_board`](Board::load_board) every field is validated and
    /// the side to move, castling rights, en passant file and halfmove clock
    /// are taken from the record.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut board = Self::from_placement(&parsed.piece_placement);
        board.history[0] = GameState::new(
            parsed.active_color,
            CastlingRights::from_fen_field(&parsed.castling),
            parsed.en_passant.map(Square::file),
            parsed.halfmove_clock,
            Piece::NONE,
        );
        board.first_fullmove = parsed.fullmove_number;
        Ok(board)
    }

    /// Returns the piece placement field for the current position.
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for rank in 0..8 {
            let mut empty_count = 0;
            for file in 0..8 {
                match self.squares[rank * 8 + file].symbol() {
                    Some(symbol) => {
                        if empty_count > 0 {
                            out.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        out.push(symbol);
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
            }
            if rank < 7 {
                out.push('/');
            }
        }
        out
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let state = self.state();
        let side = match state.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        };
        // The target square sits behind the pawn that just advanced.
        let en_passant = state
            .en_passant_file()
            .and_then(|file| match state.side_to_move() {
                Color::White => Square::from_coords(2, file),
                Color::Black => Square::from_coords(5, file),
            })
            .map_or_else(|| "-".to_string(), Square::to_algebraic);

        format!(
            "{} {} {} {} {} {}",
            self.placement(),
            side,
            state.castling().to_fen_field(),
            en_passant,
            state.halfmove_clock(),
            self.fullmove_number()
        )
    }

    /// Returns the fullmove number, counted from the loaded position.
    pub fn fullmove_number(&self) -> u32 {
        let plies = (self.history.len() - 1) as u32;
        match self.history[0].side_to_move() {
            Color::White => self.first_fullmove + plies / 2,
            Color::Black => self.first_fullmove + (plies + 1) / 2,
        }
    }

    /// Returns all 64 cells, indexed by [`Square::index`].
    #[inline]
    pub fn squares(&self) -> &[Piece; 64] {
        &self.squares
    }

    /// Returns the contents of one cell.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.squares[usize::from(sq)]
    }

    /// Returns the snapshot describing the current position.
    #[inline]
    pub fn state(&self) -> &GameState {
        // The history always holds at least the root snapshot.
        &self.history[self.history.len() - 1]
    }

    /// Returns every snapshot, oldest first.
    #[inline]
    pub fn history(&self) -> &[GameState] {
        &self.history
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state().side_to_move()
    }

    /// Applies a move.
    ///
    /// The board does not check legality; it only rejects the null move and
    /// moves whose start square is empty. A pawn reaching its last rank is
    /// replaced by the flag's promotion piece, or by a queen when the flag
    /// names none. Such an unflagged promotion cannot be undone exactly, so
    /// callers should pass promotion flags.
    ///
    /// `in_search` is reserved and has no effect.
    pub fn make_move(&mut self, m: Move, in_search: bool) -> Result<(), BoardError> {
        if m.is_null() {
            return Err(BoardError::NullMove);
        }
        let moved = self.piece_at(m.start());
        if moved.is_none() {
            return Err(BoardError::EmptySquare(m.start()));
        }
        trace!(mv = %m, in_search, "make move");

        let state = *self.state();
        let us = state.side_to_move();
        let them = us.opposite();
        let start = m.start();
        let target = m.target();
        let flag = m.flag();
        let on_target = self.piece_at(target);

        let is_pawn_move = moved.is_kind(PieceKind::Pawn);
        let is_capture = !on_target.is_none() || flag == MoveFlag::EnPassantCapture;
        let mut captured = on_target;
        let mut castling = state.castling();
        let mut en_passant_file = None;
        let mut placed = moved;

        if moved.is_kind(PieceKind::King) {
            castling = castling.without_color(us);
            if let Some((rook_from, rook_to)) = castling_rook_squares(target, flag) {
                let rook = self.take(rook_from);
                self.put(rook_to, rook);
            }
        }

        match flag {
            MoveFlag::EnPassantCapture => {
                if let Some(behind) = target.offset(-us.pawn_direction(), 0) {
                    captured = self.take(behind);
                }
            }
            MoveFlag::PawnTwoUp => en_passant_file = Some(target.file()),
            _ => {}
        }

        if moved.is_kind(PieceKind::Rook) {
            castling = revoke_corner(castling, us, start);
        }
        if on_target.is_kind(PieceKind::Rook) {
            castling = revoke_corner(castling, them, target);
        }

        if is_pawn_move && target.rank() == us.promotion_rank() {
            let kind = m.promotion_kind().unwrap_or(PieceKind::Queen);
            placed = Piece::new(us, kind);
        }

        self.put(target, placed);
        self.put(start, Piece::NONE);

        let halfmove_clock = if is_pawn_move || is_capture {
            0
        } else {
            state.halfmove_clock() + 1
        };
        self.history.push(GameState::new(
            them,
            castling,
            en_passant_file,
            halfmove_clock,
            captured,
        ));
        Ok(())
    }

    /// Undoes `m`, which must be the most recently applied move.
    ///
    /// Moves have to be undone in reverse order of application; the board
    /// only detects misuse that leaves the history empty or the target
    /// square vacant.
    ///
    /// `in_search` is reserved and has no effect.
    pub fn unmake_move(&mut self, m: Move, in_search: bool) -> Result<(), BoardError> {
        if m.is_null() {
            return Err(BoardError::NullMove);
        }
        if self.history.len() < 2 {
            warn!(mv = %m, "undo requested with no applied move");
            return Err(BoardError::HistoryExhausted);
        }
        let target = m.target();
        let mut moved = self.piece_at(target);
        if moved.is_none() {
            return Err(BoardError::EmptySquare(target));
        }
        trace!(mv = %m, in_search, "unmake move");

        let state = *self.state();
        let mover = state.side_to_move().opposite();
        let flag = m.flag();

        if moved.is_kind(PieceKind::King) {
            if let Some((rook_from, rook_to)) = castling_rook_squares(target, flag) {
                let rook = self.take(rook_to);
                self.put(rook_from, rook);
            }
        }

        if flag == MoveFlag::EnPassantCapture {
            if let Some(behind) = target.offset(-mover.pawn_direction(), 0) {
                self.put(behind, state.captured());
            }
        }

        if flag.is_promotion() && target.rank() == mover.promotion_rank() {
            moved = Piece::new(mover, PieceKind::Pawn);
        }

        self.put(m.start(), moved);
        if flag == MoveFlag::EnPassantCapture {
            self.put(target, Piece::NONE);
        } else {
            self.put(target, state.captured());
        }

        self.history.pop();
        Ok(())
    }

    /// Returns the square of `color`'s king (the first one found, scanning from a8).
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::all().find(|&sq| self.piece_at(sq) == king)
    }

    /// Returns true if `color`'s king is attacked. A missing king is not in check.
    pub fn in_check(&self, color: Color) -> bool {
        self.try_in_check(color).unwrap_or(false)
    }

    /// Like [`in_check`](Board::in_check), but reports a missing king.
    pub fn try_in_check(&self, color: Color) -> Result<bool, BoardError> {
        let king = self
            .king_square(color)
            .ok_or(BoardError::MissingKing(color))?;
        Ok(self.is_square_attacked(king, color.opposite()))
    }

    /// Returns true if any piece of `by` attacks `sq`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        Square::all().any(|from| {
            self.piece_at(from).is_color(by) && attacks::attacks(&self.squares, from, sq)
        })
    }

    /// Returns every square attacked or defended by a piece of `color`.
    pub fn controlled_squares(&self, color: Color) -> BTreeSet<Square> {
        let mut controlled = BTreeSet::new();
        for from in Square::all().filter(|&sq| self.piece_at(sq).is_color(color)) {
            attacks::controlled_squares(&self.squares, from, &mut controlled);
        }
        controlled
    }

    #[inline]
    fn put(&mut self, sq: Square, piece: Piece) {
        self.squares[usize::from(sq)] = piece;
    }

    #[inline]
    fn take(&mut self, sq: Square) -> Piece {
        std::mem::take(&mut self.squares[usize::from(sq)])
    }
}

/// Rook (from, to) squares for a castling move landing the king on `king_target`.
fn castling_rook_squares(king_target: Square, flag: MoveFlag) -> Option<(Square, Square)> {
    match flag {
        MoveFlag::KingSideCastle => Some((king_target.offset(0, 1)?, king_target.offset(0, -1)?)),
        MoveFlag::QueenSideCastle => Some((king_target.offset(0, -2)?, king_target.offset(0, 1)?)),
        _ => None,
    }
}

/// Drops `color`'s castling right tied to the rook corner `sq`, if it is one.
fn revoke_corner(castling: CastlingRights, color: Color, sq: Square) -> CastlingRights {
    if sq.rank() != color.back_rank() {
        return castling;
    }
    match sq.file() {
        0 => castling.without_queenside(color),
        7 => castling.without_kingside(color),
        _ => castling,
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Square> for Board {
    type Output = Piece;

    #[inline]
    fn index(&self, sq: Square) -> &Piece {
        &self.squares[usize::from(sq)]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8 {
            let row: Vec<String> = self.squares[rank * 8..rank * 8 + 8]
                .iter()
                .map(|p| p.to_string())
                .collect();
            writeln!(f, "{} {}", 8 - rank, row.join(" "))?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn mv(from: &str, to: &str) -> Move {
        Move::new(sq(from), sq(to))
    }

    fn flagged(from: &str, to: &str, flag: MoveFlag) -> Move {
        Move::with_flag(sq(from), sq(to), flag)
    }

    #[test]
    fn load_startpos() {
        let board = Board::startpos();
        assert_eq!(board.placement(), FenParser::STARTPOS_PLACEMENT);
        assert_eq!(board[Square::A8], Piece::from_symbol('r'));
        assert_eq!(board[Square::E1], Piece::from_symbol('K'));
        assert_eq!(board.piece_at(sq("e2")), Piece::from_symbol('P'));
        assert!(board.piece_at(sq("e4")).is_none());
        assert_eq!(board.history().len(), 1);
        assert_eq!(*board.state(), GameState::initial());
        assert_eq!(board.to_fen(), FenParser::STARTPOS);
    }

    #[test]
    fn load_ignores_fen_suffix() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4K3 b - - 5 20");
        assert_eq!(board.placement(), "4k3/8/8/8/8/8/8/4K3");
        // Suffix fields are not honoured by the placement loader.
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.state().castling(), CastlingRights::ALL);
    }

    #[test]
    fn load_partial_placement() {
        let board = Board::from_placement("rk");
        assert_eq!(board.piece_at(Square::A8), Piece::from_symbol('r'));
        assert_eq!(board.piece_at(sq("b8")), Piece::from_symbol('k'));
        assert_eq!(board.squares().iter().filter(|p| !p.is_none()).count(), 2);
    }

    #[test]
    fn load_unknown_letters_leave_cells_empty() {
        let board = Board::from_placement("rxk");
        assert_eq!(board.piece_at(Square::A8), Piece::from_symbol('r'));
        assert!(board.piece_at(sq("b8")).is_none());
        assert_eq!(board.piece_at(sq("c8")), Piece::from_symbol('k'));
    }

    #[test]
    fn load_stops_on_overflowing_rank() {
        // The ninth letter of the first rank stops parsing; later ranks are dropped.
        let board = Board::from_placement("rnbqkbnrr/pppppppp");
        assert_eq!(board.placement(), "rnbqkbnr/8/8/8/8/8/8/8");
    }

    #[test]
    fn load_resets_history() {
        let mut board = Board::startpos();
        board
            .make_move(flagged("e2", "e4", MoveFlag::PawnTwoUp), false)
            .unwrap();
        board.load_board("8/8/8/8/8/8/8/8");
        assert_eq!(board.history().len(), 1);
        assert_eq!(*board.state(), GameState::initial());
    }

    #[test]
    fn from_fen_reads_state() {
        let fen = "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w Kq e6 3 7";
        let board = Board::from_fen(fen).unwrap();
        let state = board.state();
        assert_eq!(state.side_to_move(), Color::White);
        assert_eq!(
            state.castling(),
            CastlingRights::new(CastlingRights::WHITE_KINGSIDE | CastlingRights::BLACK_QUEENSIDE)
        );
        assert_eq!(state.en_passant_file(), Some(4));
        assert_eq!(state.halfmove_clock(), 3);
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn from_fen_rejects_bad_input() {
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/8"),
            Err(FenError::InvalidPartCount(1))
        ));
    }

    #[test]
    fn double_push_sets_en_passant_file() {
        let mut board = Board::startpos();
        board
            .make_move(flagged("e2", "e4", MoveFlag::PawnTwoUp), false)
            .unwrap();
        let state = board.state();
        assert_eq!(state.side_to_move(), Color::Black);
        assert_eq!(state.en_passant_file(), Some(4));
        assert_eq!(state.halfmove_clock(), 0);
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn halfmove_clock_counts_quiet_moves() {
        let mut board = Board::startpos();
        board.make_move(mv("g1", "f3"), false).unwrap();
        board.make_move(mv("g8", "f6"), false).unwrap();
        assert_eq!(board.state().halfmove_clock(), 2);
        assert_eq!(board.fullmove_number(), 2);
        board.make_move(mv("e2", "e3"), false).unwrap();
        assert_eq!(board.state().halfmove_clock(), 0);
    }

    #[test]
    fn capture_resets_clock_and_records_piece() {
        let mut board = Board::from_fen("4k3/8/8/3p4/8/8/8/3QK3 w - - 9 1").unwrap();
        board.make_move(mv("d1", "d5"), false).unwrap();
        assert_eq!(board.state().halfmove_clock(), 0);
        assert_eq!(board.state().captured(), Piece::from_symbol('p'));

        board.unmake_move(mv("d1", "d5"), false).unwrap();
        assert_eq!(board.piece_at(sq("d5")), Piece::from_symbol('p'));
        assert_eq!(board.piece_at(sq("d1")), Piece::from_symbol('Q'));
        assert_eq!(board.state().halfmove_clock(), 9);
    }

    #[test]
    fn king_side_castle_moves_rook() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let before = board.clone();
        let castle = flagged("e1", "g1", MoveFlag::KingSideCastle);
        board.make_move(castle, false).unwrap();
        assert_eq!(board.piece_at(sq("g1")), Piece::from_symbol('K'));
        assert_eq!(board.piece_at(sq("f1")), Piece::from_symbol('R'));
        assert!(board.piece_at(Square::H1).is_none());
        assert!(board.piece_at(Square::E1).is_none());
        assert_eq!(board.state().castling().raw(), 0b0011);

        board.unmake_move(castle, false).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn queen_side_castle_moves_rook() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let before = board.clone();
        let castle = flagged("e8", "c8", MoveFlag::QueenSideCastle);
        board.make_move(castle, false).unwrap();
        assert_eq!(board.piece_at(sq("c8")), Piece::from_symbol('k'));
        assert_eq!(board.piece_at(sq("d8")), Piece::from_symbol('r'));
        assert!(board.piece_at(Square::A8).is_none());
        assert_eq!(board.state().castling().raw(), 0b1100);

        board.unmake_move(castle, false).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn rook_moves_revoke_single_right() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";

        let mut board = Board::from_fen(fen).unwrap();
        board.make_move(mv("a1", "a4"), false).unwrap();
        assert_eq!(board.state().castling().raw(), 0b0111);

        let mut board = Board::from_fen(fen).unwrap();
        board.make_move(mv("h1", "h4"), false).unwrap();
        assert_eq!(board.state().castling().raw(), 0b1011);

        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        board.make_move(mv("a8", "a5"), false).unwrap();
        assert_eq!(board.state().castling().raw(), 0b1101);
    }

    #[test]
    fn capturing_corner_rook_revokes_opponent_right() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1").unwrap();
        board.make_move(mv("g2", "a8"), false).unwrap();
        assert_eq!(board.state().castling().raw(), 0b1101);
        assert_eq!(board.state().captured(), Piece::from_symbol('r'));
    }

    #[test]
    fn rook_takes_rook_revokes_both_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        board.make_move(mv("a1", "a8"), false).unwrap();
        assert_eq!(board.state().castling().raw(), 0b0101);
    }

    #[test]
    fn king_move_revokes_both_rights() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        board.make_move(mv("e1", "d1"), false).unwrap();
        assert_eq!(board.state().castling().raw(), 0b0011);
    }

    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let before = board.clone();
        let capture = flagged("e5", "d6", MoveFlag::EnPassantCapture);
        board.make_move(capture, false).unwrap();
        assert_eq!(board.piece_at(sq("d6")), Piece::from_symbol('P'));
        assert!(board.piece_at(sq("d5")).is_none());
        assert!(board.piece_at(sq("e5")).is_none());
        assert_eq!(board.state().captured(), Piece::from_symbol('p'));

        board.unmake_move(capture, false).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn promotion_and_undo() {
        let mut board = Board::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = board.clone();
        let promote = flagged("a7", "b8", MoveFlag::PromoteToKnight);
        board.make_move(promote, false).unwrap();
        assert_eq!(board.piece_at(sq("b8")), Piece::from_symbol('N'));
        assert_eq!(board.state().captured(), Piece::from_symbol('n'));

        board.unmake_move(promote, false).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn unflagged_promotion_defaults_to_queen() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").unwrap();
        board.make_move(mv("a2", "a1"), false).unwrap();
        assert_eq!(board.piece_at(Square::A1), Piece::from_symbol('q'));
    }

    #[test]
    fn make_rejects_structural_errors() {
        let mut board = Board::startpos();
        assert_eq!(board.make_move(Move::NULL, false), Err(BoardError::NullMove));
        assert_eq!(
            board.make_move(mv("e4", "e5"), false),
            Err(BoardError::EmptySquare(sq("e4")))
        );
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn unmake_rejects_exhausted_history() {
        let mut board = Board::startpos();
        assert_eq!(
            board.unmake_move(mv("e2", "e3"), false),
            Err(BoardError::HistoryExhausted)
        );
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn unmake_rejects_null_and_vacant_target() {
        let mut board = Board::startpos();
        board.make_move(mv("g1", "f3"), false).unwrap();
        let before = board.clone();

        assert_eq!(board.unmake_move(Move::NULL, false), Err(BoardError::NullMove));
        assert_eq!(
            board.unmake_move(mv("e2", "e4"), false),
            Err(BoardError::EmptySquare(sq("e4")))
        );
        assert_eq!(board, before);
        assert_eq!(board.history().len(), 2);

        board.unmake_move(mv("g1", "f3"), false).unwrap();
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn en_passant_square_survives_fen_round_trip() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
        // A rank-3 target with White to move names the wrong side's pawn.
        assert!(matches!(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn rook_on_shared_rank_gives_check() {
        let mut board = Board::new();
        board.load_board("r6K/8/8/8/8/8/8/8");
        assert_eq!(board.piece_at(Square::A8), Piece::from_symbol('r'));
        assert_eq!(board.king_square(Color::White), Some(Square::H8));
        assert!(board.in_check(Color::White));
        assert_eq!(board.try_in_check(Color::White), Ok(true));
    }

    #[test]
    fn blocked_rook_gives_no_check() {
        let board = Board::from_placement("r2N3K/8/8/8/8/8/8/8");
        assert!(!board.in_check(Color::White));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let board = Board::from_placement("r7/8/8/8/8/8/8/8");
        assert!(!board.in_check(Color::White));
        assert_eq!(
            board.try_in_check(Color::White),
            Err(BoardError::MissingKing(Color::White))
        );
    }

    #[test]
    fn startpos_control() {
        let board = Board::startpos();
        let white = board.controlled_squares(Color::White);
        // Whole third rank is covered by pawns, f3/h3 and a3/c3 also by knights.
        for file in 0..8 {
            assert!(white.contains(&Square::from_coords(5, file).unwrap()));
        }
        assert!(!white.contains(&sq("e4")));
        assert!(white.contains(&sq("d2")));
        assert!(board.is_square_attacked(sq("e3"), Color::White));
        assert!(!board.is_square_attacked(sq("e4"), Color::White));
    }

    #[test]
    fn display_draws_diagram() {
        let board = Board::from_placement("4k3/8/8/8/8/8/8/4K3");
        let text = board.to_string();
        assert!(text.starts_with("8 . . . . k . . ."));
        assert!(text.contains("1 . . . . K . . ."));
        assert!(text.ends_with("a b c d e f g h"));
    }
}
