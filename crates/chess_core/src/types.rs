use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Row delta of a forward pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
    pub fn pawn_home_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
    /// Row a pawn of this colour promotes on.
    pub fn promotion_row(self) -> u8 {
        self.other().back_rank()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, in the order they are tried.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }

    /// Upper-case SAN letter; pawns have none.
    pub fn letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { kind, color }
    }

    /// FEN character: upper case for white, lower case for black.
    pub fn fen_char(self) -> char {
        let c = self.kind.letter().unwrap_or('P');
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { kind, color })
    }
}

/// Board coordinate. Row 0 is black's back rank (rank 8), row 7 is white's (rank 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// Offsets the coordinate, returning `None` when it leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Coord> {
        let r = self.row as i8 + d_row;
        let c = self.col as i8 + d_col;
        if (0..8).contains(&r) && (0..8).contains(&c) {
            Some(Coord::new(r as u8, c as u8))
        } else {
            None
        }
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Coord::new(row, col)))
    }

    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Coord, to: Coord, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }

    pub fn row_delta(&self) -> i8 {
        self.to.row as i8 - self.from.row as i8
    }

    pub fn col_delta(&self) -> i8 {
        self.to.col as i8 - self.from.col as i8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideCastling {
    pub king_side: bool,
    pub queen_side: bool,
}

impl SideCastling {
    pub const BOTH: SideCastling = SideCastling {
        king_side: true,
        queen_side: true,
    };
    pub const NONE: SideCastling = SideCastling {
        king_side: false,
        queen_side: false,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: SideCastling,
    pub black: SideCastling,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white: SideCastling::BOTH,
        black: SideCastling::BOTH,
    };
    pub const NONE: CastlingRights = CastlingRights {
        white: SideCastling::NONE,
        black: SideCastling::NONE,
    };

    pub fn side(&self, c: Color) -> SideCastling {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn side_mut(&mut self, c: Color) -> &mut SideCastling {
        match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn revoke_all(&mut self, c: Color) {
        *self.side_mut(c) = SideCastling::NONE;
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

// Helpers
pub const KING_HOME_COL: u8 = 4;
pub const KING_SIDE_ROOK_COL: u8 = 7;
pub const QUEEN_SIDE_ROOK_COL: u8 = 0;

pub fn king_home(c: Color) -> Coord {
    Coord::new(c.back_rank(), KING_HOME_COL)
}
