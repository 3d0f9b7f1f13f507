//! Standard Algebraic Notation.
//!
//! Generation ([`to_algebraic`]) is authoritative. Parsing ([`parse_san`]) is a
//! best-effort reverse mapping for externally suggested moves: it matches the
//! text against the legal moves of the position and reports anything it cannot
//! resolve to exactly one of them.

use crate::{
    board::Position,
    error::NotationError,
    movegen::{has_legal_move, legal_moves},
    rules::{apply_move, is_castling_move, is_en_passant_capture, is_legal_move},
    types::*,
};

/// Check status of the position reached by a move, rendered as a SAN suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckState {
    Quiet,
    Check,
    Checkmate,
}

impl CheckState {
    pub fn suffix(self) -> &'static str {
        match self {
            CheckState::Quiet => "",
            CheckState::Check => "+",
            CheckState::Checkmate => "#",
        }
    }
}

/// Derives the suffix state by playing `mv` on a copy of `before`.
pub fn check_state_after(before: &Position, mv: &Move) -> CheckState {
    let next = apply_move(before, mv);
    if !next.in_check(next.turn) {
        CheckState::Quiet
    } else if has_legal_move(&next) {
        CheckState::Check
    } else {
        CheckState::Checkmate
    }
}

pub fn square_name(c: Coord) -> String {
    c.to_string()
}

pub fn parse_square(text: &str) -> Option<Coord> {
    let b = text.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let (f, r) = (b[0], b[1]);
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    Some(Coord::new(b'8' - r, f - b'a'))
}

/// Renders `mv`, played from `before`, in SAN. `check` comes from the
/// position after the move (see [`check_state_after`]).
pub fn to_algebraic(before: &Position, mv: &Move, check: CheckState) -> String {
    let suffix = check.suffix();
    let Some(piece) = before.piece_at(mv.from) else {
        return format!("{}{}", mv.from, mv.to);
    };

    if is_castling_move(before, mv) {
        let castle = if mv.col_delta() > 0 { "O-O" } else { "O-O-O" };
        return format!("{castle}{suffix}");
    }

    let capture = before.piece_at(mv.to).is_some() || is_en_passant_capture(before, mv);
    let mut san = String::with_capacity(8);
    match piece.kind.letter() {
        None => {
            if capture {
                san.push(mv.from.file_char());
            }
        }
        Some(letter) => {
            san.push(letter);
            san.push_str(&disambiguation(before, mv, piece));
        }
    }
    if capture {
        san.push('x');
    }
    san.push_str(&square_name(mv.to));
    if piece.kind == PieceKind::Pawn
        && let Some(letter) = mv.promotion.and_then(PieceKind::letter)
    {
        san.push('=');
        san.push(letter);
    }
    san.push_str(suffix);
    san
}

/// File, rank or both of the origin, as needed to tell the mover apart from
/// other same-kind pieces that could also reach the destination.
fn disambiguation(before: &Position, mv: &Move, piece: Piece) -> String {
    let rivals: Vec<Coord> = before
        .board
        .pieces_of(piece.color)
        .filter(|&(c, pc)| pc.kind == piece.kind && c != mv.from)
        .map(|(c, _)| c)
        .filter(|&c| is_legal_move(before, &Move::new(c, mv.to)))
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    let shares_file = rivals.iter().any(|c| c.col == mv.from.col);
    let shares_rank = rivals.iter().any(|c| c.row == mv.from.row);
    match (shares_file, shares_rank) {
        (false, _) => mv.from.file_char().to_string(),
        (true, false) => mv.from.rank_char().to_string(),
        (true, true) => square_name(mv.from),
    }
}

/// What the text pins down about the intended move.
struct MovePattern {
    kind: Option<PieceKind>,
    from_file: Option<u8>,
    from_rank: Option<u8>,
    from: Option<Coord>,
    to: Coord,
    promotion: Option<PieceKind>,
}

impl MovePattern {
    fn matches(&self, pos: &Position, mv: &Move) -> bool {
        if mv.to != self.to {
            return false;
        }
        if self.from.is_some_and(|f| f != mv.from)
            || self.from_file.is_some_and(|f| f != mv.from.col)
            || self.from_rank.is_some_and(|r| r != mv.from.row)
        {
            return false;
        }
        if let Some(kind) = self.kind
            && pos.piece_at(mv.from).map(|pc| pc.kind) != Some(kind)
        {
            return false;
        }
        match self.promotion {
            Some(p) => mv.promotion == Some(p),
            // An unnamed promotion is read as a queen.
            None => matches!(mv.promotion, None | Some(PieceKind::Queen)),
        }
    }
}

/// Maps SAN (`Nf3`, `exd6`, `e8=Q+`, `O-O`) or coordinate text (`e2e4`,
/// `e7e8q`) onto the single legal move it denotes.
pub fn parse_san(pos: &Position, text: &str) -> Result<Move, NotationError> {
    let malformed = || NotationError::Malformed(text.to_string());
    let cleaned = text
        .trim()
        .trim_end_matches(['+', '#', '!', '?'])
        .replace('=', "");
    if cleaned.is_empty() || !cleaned.is_ascii() {
        return Err(malformed());
    }

    let castle = cleaned.replace('0', "O");
    if castle == "O-O" || castle == "O-O-O" {
        let king = king_home(pos.turn);
        let col = if castle == "O-O" { 6 } else { 2 };
        let mv = Move::new(king, Coord::new(king.row, col));
        return if is_legal_move(pos, &mv) {
            Ok(mv)
        } else {
            Err(NotationError::NoMatch(text.to_string()))
        };
    }

    let pattern = coordinate_pattern(&cleaned)
        .or_else(|| san_pattern(&cleaned))
        .ok_or_else(malformed)?;

    let mut found = legal_moves(pos)
        .into_iter()
        .filter(|mv| pattern.matches(pos, mv));
    match (found.next(), found.next()) {
        (Some(mv), None) => Ok(mv),
        (None, _) => Err(NotationError::NoMatch(text.to_string())),
        (Some(_), Some(_)) => Err(NotationError::Ambiguous(text.to_string())),
    }
}

fn coordinate_pattern(s: &str) -> Option<MovePattern> {
    if !(s.len() == 4 || s.len() == 5) {
        return None;
    }
    let from = parse_square(&s[0..2])?;
    let to = parse_square(&s[2..4])?;
    let promotion = match s[4..].chars().next() {
        Some(c) => Some(PieceKind::from_letter(c).filter(|k| k.is_promotion_target())?),
        None => None,
    };
    Some(MovePattern {
        kind: None,
        from_file: None,
        from_rank: None,
        from: Some(from),
        to,
        promotion,
    })
}

fn san_pattern(s: &str) -> Option<MovePattern> {
    let mut body = s;
    let mut promotion = None;
    if let Some(last) = body.chars().last()
        && last.is_ascii_uppercase()
        && body.len() >= 3
    {
        promotion = Some(PieceKind::from_letter(last).filter(|k| k.is_promotion_target())?);
        body = &body[..body.len() - 1];
    }
    if body.len() < 2 {
        return None;
    }
    let to = parse_square(&body[body.len() - 2..])?;
    let head = &body[..body.len() - 2];

    let (kind, rest) = match head.chars().next() {
        Some(c) if c.is_ascii_uppercase() => (PieceKind::from_letter(c)?, &head[1..]),
        _ => (PieceKind::Pawn, head),
    };
    if promotion.is_some() && kind != PieceKind::Pawn {
        return None;
    }

    let mut from_file = None;
    let mut from_rank = None;
    for ch in rest.chars() {
        match ch {
            'a'..='h' => from_file = Some(ch as u8 - b'a'),
            '1'..='8' => from_rank = Some(b'8' - ch as u8),
            'x' | ':' | '-' => {}
            _ => return None,
        }
    }
    // A pawn capture always names its file; without one the text is a push.
    if kind == PieceKind::Pawn && from_file.is_none() {
        from_file = Some(to.col);
    }
    Some(MovePattern {
        kind: Some(kind),
        from_file,
        from_rank,
        from: None,
        to,
        promotion,
    })
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
