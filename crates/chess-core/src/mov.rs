//! Move representation.

use crate::{PieceKind, Square};
use std::fmt;

/// Flags for special move types, stored in the top four bits of a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Ordinary move or capture.
    NoFlag = 0,
    /// En passant capture; the captured pawn is not on the target square.
    EnPassantCapture = 1,
    /// King-side castling (the move records the king's step).
    KingSideCastle = 2,
    /// Queen-side castling.
    QueenSideCastle = 3,
    PromoteToQueen = 4,
    PromoteToKnight = 5,
    PromoteToRook = 6,
    PromoteToBishop = 7,
    /// Pawn advance of two squares from its starting rank.
    PawnTwoUp = 8,
}

impl MoveFlag {
    /// Promotion flags in the order the move generator emits them.
    pub const PROMOTIONS: [MoveFlag; 4] = [
        MoveFlag::PromoteToQueen,
        MoveFlag::PromoteToKnight,
        MoveFlag::PromoteToRook,
        MoveFlag::PromoteToBishop,
    ];

    /// Decodes a 4-bit flag value. Unassigned values (9-15) yield `None`.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(MoveFlag::NoFlag),
            1 => Some(MoveFlag::EnPassantCapture),
            2 => Some(MoveFlag::KingSideCastle),
            3 => Some(MoveFlag::QueenSideCastle),
            4 => Some(MoveFlag::PromoteToQueen),
            5 => Some(MoveFlag::PromoteToKnight),
            6 => Some(MoveFlag::PromoteToRook),
            7 => Some(MoveFlag::PromoteToBishop),
            8 => Some(MoveFlag::PawnTwoUp),
            _ => None,
        }
    }

    /// Returns the piece kind a promotion flag promotes to.
    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteToQueen => Some(PieceKind::Queen),
            MoveFlag::PromoteToKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteToRook => Some(PieceKind::Rook),
            MoveFlag::PromoteToBishop => Some(PieceKind::Bishop),
            _ => None,
        }
    }

    /// Returns true for the four promotion flags.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(
            self,
            MoveFlag::PromoteToQueen
                | MoveFlag::PromoteToKnight
                | MoveFlag::PromoteToRook
                | MoveFlag::PromoteToBishop
        )
    }

    /// Returns true for either castling flag.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::KingSideCastle | MoveFlag::QueenSideCastle)
    }
}

const START_MASK: u16 = 0b0000_0000_0011_1111;
const TARGET_MASK: u16 = 0b0000_1111_1100_0000;

/// A chess move.
///
/// Encoded compactly: 6 bits start, 6 bits target, 4 bits flag = 16 bits total.
/// The all-zero value is [`Move::NULL`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move(0);

    /// Wraps an already packed value.
    #[inline]
    pub const fn from_raw(value: u16) -> Self {
        Move(value)
    }

    /// Creates a move with no flag.
    #[inline]
    pub const fn new(start: Square, target: Square) -> Self {
        Self::with_flag(start, target, MoveFlag::NoFlag)
    }

    /// Creates a move carrying a flag.
    #[inline]
    pub const fn with_flag(start: Square, target: Square, flag: MoveFlag) -> Self {
        let encoded =
            (start.index() as u16) | ((target.index() as u16) << 6) | ((flag as u16) << 12);
        Move(encoded)
    }

    /// Returns the packed value.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns true for the all-zero sentinel.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the square the moving piece leaves.
    #[inline]
    pub const fn start(self) -> Square {
        match Square::from_index((self.0 & START_MASK) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the square the moving piece lands on.
    #[inline]
    pub const fn target(self) -> Square {
        match Square::from_index(((self.0 & TARGET_MASK) >> 6) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the raw 4-bit flag value.
    #[inline]
    pub const fn flag_bits(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Returns the move flag. Unassigned flag bits read as [`MoveFlag::NoFlag`].
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        match MoveFlag::from_bits(self.flag_bits()) {
            Some(flag) => flag,
            None => MoveFlag::NoFlag,
        }
    }

    /// Returns true if the flag is one of the promotion flags.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flag().is_promotion()
    }

    /// Returns the kind a promotion promotes to, `None` for other moves.
    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        self.flag().promotion_kind()
    }

    /// Returns coordinate notation (e.g., "e2e4", "e7e8q").
    pub fn to_coordinate(self) -> String {
        match self.promotion_kind() {
            Some(kind) => format!("{}{}{}", self.start(), self.target(), kind.symbol()),
            None => format!("{}{}", self.start(), self.target()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(f, "Move({}, {:?})", self.to_coordinate(), self.flag())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}
