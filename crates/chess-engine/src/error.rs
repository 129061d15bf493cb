//! Errors reported by the board.

use chess_core::{Color, Square};
use thiserror::Error;

/// Structural failures of the make/unmake protocol and of king lookups.
///
/// Move legality is not an error here: the board applies whatever it is
/// given, and the move generator filters legal moves.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The null move was passed to make or unmake.
    #[error("the null move cannot be applied")]
    NullMove,

    /// The square a move reads its piece from holds nothing.
    #[error("no piece on {0}")]
    EmptySquare(Square),

    /// The position has no king of the given color.
    #[error("no {0} king on the board")]
    MissingKing(Color),

    /// Undo was requested with no applied move on the history stack.
    #[error("no move left to undo")]
    HistoryExhausted,
}
