//! Game state snapshots kept on the board's history stack.

use chess_core::{Color, Piece};

/// Castling rights flags.
///
/// White's pair of bits sits two places above Black's: bit 0/1 are Black's
/// king/queen side, bit 2/3 White's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const BLACK_KINGSIDE: u8 = 0b0001;
    pub const BLACK_QUEENSIDE: u8 = 0b0010;
    pub const WHITE_KINGSIDE: u8 = 0b0100;
    pub const WHITE_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    #[inline]
    const fn shift(color: Color) -> u8 {
        match color {
            Color::White => 2,
            Color::Black => 0,
        }
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        (self.0 >> Self::shift(color)) & 0b01 != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        (self.0 >> Self::shift(color)) & 0b10 != 0
    }

    /// Returns these rights without either of `color`'s flags.
    #[inline]
    #[must_use]
    pub const fn without_color(self, color: Color) -> Self {
        CastlingRights(self.0 & !(0b11 << Self::shift(color)))
    }

    /// Returns these rights without `color`'s kingside flag.
    #[inline]
    #[must_use]
    pub const fn without_kingside(self, color: Color) -> Self {
        CastlingRights(self.0 & !(0b01 << Self::shift(color)))
    }

    /// Returns these rights without `color`'s queenside flag.
    #[inline]
    #[must_use]
    pub const fn without_queenside(self, color: Color) -> Self {
        CastlingRights(self.0 & !(0b10 << Self::shift(color)))
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Builds rights from a FEN castling field ("KQkq", "Kq", ...).
    pub fn from_fen_field(field: &str) -> Self {
        let mut flags = 0u8;
        for c in field.chars() {
            match c {
                'K' => flags |= Self::WHITE_KINGSIDE,
                'Q' => flags |= Self::WHITE_QUEENSIDE,
                'k' => flags |= Self::BLACK_KINGSIDE,
                'q' => flags |= Self::BLACK_QUEENSIDE,
                _ => {}
            }
        }
        CastlingRights(flags)
    }

    /// Writes the rights as a FEN castling field, "-" when none remain.
    pub fn to_fen_field(self) -> String {
        let mut field = String::new();
        if self.can_castle_kingside(Color::White) {
            field.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            field.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            field.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            field.push('q');
        }
        if field.is_empty() {
            field.push('-');
        }
        field
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// Everything needed to undo a move beyond the piece positions.
///
/// A snapshot is created once per applied move and never changed afterwards;
/// the board pushes a fresh one for every move and pops it on undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    side_to_move: Color,
    castling: CastlingRights,
    en_passant_file: Option<u8>,
    halfmove_clock: u32,
    captured: Piece,
}

impl GameState {
    /// Creates a snapshot from its parts.
    pub const fn new(
        side_to_move: Color,
        castling: CastlingRights,
        en_passant_file: Option<u8>,
        halfmove_clock: u32,
        captured: Piece,
    ) -> Self {
        GameState {
            side_to_move,
            castling,
            en_passant_file,
            halfmove_clock,
            captured,
        }
    }

    /// The state of a freshly loaded position: White to move, every castling
    /// right, no en passant file, a zero clock.
    pub const fn initial() -> Self {
        Self::new(Color::White, CastlingRights::ALL, None, 0, Piece::NONE)
    }

    /// The side to move.
    #[inline]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns true if White is to move.
    #[inline]
    pub const fn white_to_move(&self) -> bool {
        matches!(self.side_to_move, Color::White)
    }

    /// Castling rights.
    #[inline]
    pub const fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// File of a pawn that just advanced two squares.
    #[inline]
    pub const fn en_passant_file(&self) -> Option<u8> {
        self.en_passant_file
    }

    /// Plies since the last pawn move or capture.
    #[inline]
    pub const fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// The piece removed by the move that produced this snapshot.
    #[inline]
    pub const fn captured(&self) -> Piece {
        self.captured
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
