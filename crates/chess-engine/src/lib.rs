//! Chess rules on a mailbox board.
//!
//! This crate provides:
//! - [`Board`] - 64 cells plus a history of [`GameState`] snapshots, with
//!   reversible [`make_move`](Board::make_move) / [`unmake_move`](Board::unmake_move)
//! - Check detection and controlled-square queries
//! - [`MoveGenerator`] - legal move generation per piece or for the whole side
//! - [`RulesConfig`] - TOML configuration of the start position and castling rule
//!
//! # Example
//!
//! ```
//! use chess_engine::{generate_moves_of_piece, Board};
//! use chess_core::{MoveFlag, Square};
//!
//! let mut board = Board::startpos();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let moves = generate_moves_of_piece(&mut board, e2);
//! assert_eq!(moves.len(), 2);
//!
//! let double_push = moves
//!     .iter()
//!     .copied()
//!     .find(|m| m.flag() == MoveFlag::PawnTwoUp)
//!     .unwrap();
//! board.make_move(double_push, false).unwrap();
//! assert_eq!(board.state().en_passant_file(), Some(4));
//!
//! board.unmake_move(double_push, false).unwrap();
//! assert_eq!(board, Board::startpos());
//! ```

mod attacks;
mod board;
mod config;
mod error;
mod game_state;
pub mod movegen;

pub use board::Board;
pub use config::{ConfigError, RulesConfig};
pub use error::BoardError;
pub use game_state::{CastlingRights, GameState};
pub use movegen::{
    generate_moves, generate_moves_of_piece, perft::perft, CastlingCheck, MoveGenerator, MoveList,
};
