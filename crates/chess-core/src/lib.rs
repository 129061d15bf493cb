//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and its
//! collaborators:
//! - [`Piece`], [`PieceKind`] and [`Color`] for the one-byte piece codes
//! - [`Square`] for board cells, numbered from the top of a board diagram
//! - [`Move`] and [`MoveFlag`] for the packed 16-bit move encoding
//! - FEN validation

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, PieceKind};
pub use square::{InvalidSquare, Square};
