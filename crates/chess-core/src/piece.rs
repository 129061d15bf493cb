//! Chess piece codes.
//!
//! A piece is stored as a single byte: the low three bits hold the
//! [`PieceKind`] and bit 3 holds the color (clear for White, set for Black).
//! A code of zero is an empty square.

use std::fmt;

use crate::Color;

const KIND_MASK: u8 = 0b0111;
const COLOR_MASK: u8 = 0b1000;

/// The six types of chess pieces, numbered as they appear in piece codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// Decodes a 3-bit type code. Zero and the unused code 7 yield `None`.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Rook),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Knight),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Returns the 3-bit type code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase FEN letter for this kind.
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Returns true for bishops, rooks and queens.
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The contents of one board cell: a colored piece or nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece(u8);

impl Piece {
    /// The empty cell.
    pub const NONE: Piece = Piece(0);

    /// Combines a color and a kind into a piece code.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece(color.piece_bit() | kind.code())
    }

    /// Wraps a raw code, keeping only the color and type bits.
    #[inline]
    pub const fn from_code(code: u8) -> Self {
        Piece(code & (KIND_MASK | COLOR_MASK))
    }

    /// Returns the raw code.
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Returns true if this is the empty cell.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns the color bit. An empty cell reads as White.
    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & COLOR_MASK == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Returns the piece kind, or `None` for an empty cell.
    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        PieceKind::from_code(self.0 & KIND_MASK)
    }

    /// Returns true if this cell holds a piece of the given kind (any color).
    #[inline]
    pub fn is_kind(self, kind: PieceKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Returns true if this cell holds a piece of `color`.
    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        self.kind().is_some() && self.color() == color
    }

    /// Parses a FEN letter. Uppercase is White; anything unrecognized is empty.
    pub const fn from_symbol(symbol: char) -> Self {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Piece::NONE,
        };
        Piece::new(color, kind)
    }

    /// Returns the FEN letter for this piece, or `None` for an empty cell.
    pub fn symbol(self) -> Option<char> {
        let c = self.kind()?.symbol();
        Some(match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        })
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "Piece({} {})", self.color(), kind),
            None => write!(f, "Piece(None)"),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol().unwrap_or('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_layout() {
        assert_eq!(Piece::new(Color::White, PieceKind::Pawn).code(), 1);
        assert_eq!(Piece::new(Color::White, PieceKind::King).code(), 6);
        assert_eq!(Piece::new(Color::Black, PieceKind::Rook).code(), 0b1010);
        assert_eq!(Piece::new(Color::Black, PieceKind::King).code(), 0b1110);
    }

    #[test]
    fn color_and_kind_are_independent() {
        let black_knight = Piece::new(Color::Black, PieceKind::Knight);
        assert_eq!(black_knight.color(), Color::Black);
        assert_eq!(black_knight.kind(), Some(PieceKind::Knight));

        let white_queen = Piece::new(Color::White, PieceKind::Queen);
        assert_eq!(white_queen.color(), Color::White);
        assert_eq!(white_queen.kind(), Some(PieceKind::Queen));
    }

    #[test]
    fn empty_cell() {
        assert!(Piece::NONE.is_none());
        assert_eq!(Piece::NONE.kind(), None);
        assert_eq!(Piece::NONE.symbol(), None);
        assert!(!Piece::NONE.is_color(Color::White));
        assert_eq!(Piece::default(), Piece::NONE);
    }

    #[test]
    fn from_symbol() {
        assert_eq!(
            Piece::from_symbol('P'),
            Piece::new(Color::White, PieceKind::Pawn)
        );
        assert_eq!(
            Piece::from_symbol('q'),
            Piece::new(Color::Black, PieceKind::Queen)
        );
        assert_eq!(
            Piece::from_symbol('N'),
            Piece::new(Color::White, PieceKind::Knight)
        );
        assert_eq!(Piece::from_symbol('x'), Piece::NONE);
        assert_eq!(Piece::from_symbol('3'), Piece::NONE);
        assert_eq!(Piece::from_symbol(' '), Piece::NONE);
    }

    #[test]
    fn symbol_inverts_from_symbol() {
        for c in "prbnqkPRBNQK".chars() {
            assert_eq!(Piece::from_symbol(c).symbol(), Some(c));
        }
    }

    #[test]
    fn from_code_masks_extra_bits() {
        assert_eq!(Piece::from_code(0b1_0110).code(), 0b0110);
        assert_eq!(Piece::from_code(0b0111).kind(), None);
    }

    #[test]
    fn is_slider() {
        assert!(!PieceKind::Pawn.is_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(PieceKind::Bishop.is_slider());
        assert!(PieceKind::Rook.is_slider());
        assert!(PieceKind::Queen.is_slider());
        assert!(!PieceKind::King.is_slider());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Piece::from_symbol('k')), "k");
        assert_eq!(format!("{}", Piece::NONE), ".");
        assert_eq!(
            format!("{:?}", Piece::from_symbol('R')),
            "Piece(White Rook)"
        );
    }
}
