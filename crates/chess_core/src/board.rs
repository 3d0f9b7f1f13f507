use serde::{Deserialize, Serialize};

use crate::types::*;

/// 8x8 grid of squares indexed `[row][col]`; row 0 is black's back rank.
///
/// The whole board is a small `Copy` value, so search branches copy it on the
/// stack instead of sharing a mutable board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn standard() -> Self {
        let mut b = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            b.squares[0][col] = Some(Piece::new(Color::Black, kind));
            b.squares[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            b.squares[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            b.squares[7][col] = Some(Piece::new(Color::White, kind));
        }
        b
    }

    /// Square contents; out-of-range coordinates read as empty.
    pub fn get(&self, c: Coord) -> Option<Piece> {
        if c.in_bounds() {
            self.squares[c.row as usize][c.col as usize]
        } else {
            None
        }
    }

    pub fn set(&mut self, c: Coord, pc: Option<Piece>) {
        if c.in_bounds() {
            self.squares[c.row as usize][c.col as usize] = pc;
        }
    }

    pub fn take(&mut self, c: Coord) -> Option<Piece> {
        let pc = self.get(c);
        self.set(c, None);
        pc
    }

    pub fn is_empty(&self, c: Coord) -> bool {
        self.get(c).is_none()
    }

    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |c| self.get(c).map(|pc| (c, pc)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, pc)| pc.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Coord> {
        self.pieces()
            .find(|(_, pc)| pc.color == color && pc.kind == PieceKind::King)
            .map(|(c, _)| c)
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces()
            .filter(|(_, pc)| pc.color == color && pc.kind == kind)
            .count()
    }

    /// FEN piece-placement field, rank 8 first.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (r, row) in self.squares.iter().enumerate() {
            let mut gap = 0;
            for sq in row {
                match sq {
                    Some(pc) => {
                        if gap > 0 {
                            out.push(char::from(b'0' + gap));
                            gap = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push(char::from(b'0' + gap));
            }
            if r < 7 {
                out.push('/');
            }
        }
        out
    }

    /// Parses a FEN piece-placement field. Returns `None` on any malformed rank.
    pub fn from_placement(text: &str) -> Option<Board> {
        let ranks: Vec<&str> = text.split('/').collect();
        if ranks.len() != 8 {
            return None;
        }
        let mut b = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0u8;
            for ch in rank.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as u8;
                } else {
                    let pc = Piece::from_fen_char(ch)?;
                    if col >= 8 {
                        return None;
                    }
                    b.squares[row][col as usize] = Some(pc);
                    col += 1;
                }
                if col > 8 {
                    return None;
                }
            }
            if col != 8 {
                return None;
            }
        }
        Some(b)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

/// Everything the rules engine needs to adjudicate a move.
///
/// Move history lives beside the position (see [`crate::history`]) and is
/// passed explicitly to the draw rules and the FEN exporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub board: Board,
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub last_move: Option<Move>,
}

impl Position {
    pub fn startpos() -> Self {
        Position {
            board: Board::standard(),
            turn: Color::White,
            castling_rights: CastlingRights::ALL,
            last_move: None,
        }
    }

    /// A position on an arbitrary board with full castling rights and no
    /// previous move. Castling still requires the rook on its home square.
    pub fn new(board: Board, turn: Color) -> Self {
        Position {
            board,
            turn,
            castling_rights: CastlingRights::ALL,
            last_move: None,
        }
    }

    pub fn piece_at(&self, c: Coord) -> Option<Piece> {
        self.board.get(c)
    }

    pub fn in_check(&self, c: Color) -> bool {
        crate::rules::is_king_in_check(&self.board, c)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
