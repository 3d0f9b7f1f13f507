use super::*;
use crate::notation::parse_square;

fn sq(name: &str) -> Coord {
    parse_square(name).unwrap()
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

fn fen(text: &str) -> Position {
    Position::from_fen(text).unwrap()
}

fn play(pos: &Position, from: &str, to: &str) -> Position {
    let m = mv(from, to);
    assert!(is_legal_move(pos, &m), "{from}{to} should be legal");
    apply_move(pos, &m)
}

#[test]
fn test_pawn_pushes() {
    let pos = Position::startpos();
    assert!(is_legal_move(&pos, &mv("e2", "e3")));
    assert!(is_legal_move(&pos, &mv("e2", "e4")));
    assert!(!is_legal_move(&pos, &mv("e2", "e5")));
    assert!(!is_legal_move(&pos, &mv("e2", "d3")));
    // Black piece on white's turn.
    assert!(!is_legal_move(&pos, &mv("e7", "e5")));
}

#[test]
fn test_pawn_double_push_blocked() {
    let pos = fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
    assert!(!is_legal_move(&pos, &mv("e2", "e3")));
    assert!(!is_legal_move(&pos, &mv("e2", "e4")));
}

#[test]
fn test_knight_jumps_over_pieces() {
    let pos = Position::startpos();
    assert!(is_legal_move(&pos, &mv("g1", "f3")));
    assert!(is_legal_move(&pos, &mv("b1", "c3")));
    assert!(!is_legal_move(&pos, &mv("g1", "e2")));
}

#[test]
fn test_sliders_need_clear_path() {
    let pos = Position::startpos();
    assert!(!is_legal_move(&pos, &mv("f1", "c4")));
    assert!(!is_legal_move(&pos, &mv("a1", "a3")));
    let pos = play(&pos, "e2", "e4");
    let pos = play(&pos, "e7", "e5");
    assert!(is_legal_move(&pos, &mv("f1", "c4")));
    assert!(is_legal_move(&pos, &mv("d1", "h5")));
    assert!(!is_legal_move(&pos, &mv("d1", "d3")));
}

#[test]
fn test_cannot_capture_own_piece_or_stay() {
    let pos = Position::startpos();
    assert!(!is_legal_move(&pos, &mv("a1", "a2")));
    assert!(!is_legal_move(&pos, &mv("e2", "e2")));
    assert!(!is_legal_move(
        &pos,
        &Move::new(Coord::new(6, 4), Coord::new(9, 4))
    ));
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight on e2 pinned by the rook on e8.
    let pos = fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
    assert!(is_pseudo_legal(&pos, &mv("e2", "c3")));
    assert!(!is_legal_move(&pos, &mv("e2", "c3")));
}

#[test]
fn test_must_escape_check() {
    let pos = fen("4k3/8/8/8/8/8/3PPP2/r3K3 w - - 0 1");
    assert!(pos.in_check(Color::White));
    assert!(!is_legal_move(&pos, &mv("e2", "e3")));
    assert!(!is_legal_move(&pos, &mv("e1", "d1")));
}

#[test]
fn test_pawn_attacks_only_diagonally() {
    let board = fen("4k3/8/8/8/4p3/8/8/4K3 w - - 0 1").board;
    assert!(attacks_square(&board, sq("e4"), sq("d3")));
    assert!(attacks_square(&board, sq("e4"), sq("f3")));
    assert!(!attacks_square(&board, sq("e4"), sq("e3")));
    assert!(!attacks_square(&board, sq("e4"), sq("d5")));
}

#[test]
fn test_king_attack_is_adjacent_only() {
    let board = Board::standard();
    assert!(attacks_square(&board, sq("e1"), sq("f2")));
    assert!(!attacks_square(&board, sq("e1"), sq("g1")));
}

#[test]
fn test_king_in_check_without_king_is_false() {
    let board = Board::from_placement("8/8/8/8/8/8/8/r7").unwrap();
    assert!(!is_king_in_check(&board, Color::White));
}

#[test]
fn test_en_passant() {
    let pos = Position::startpos();
    let pos = play(&pos, "e2", "e4");
    let pos = play(&pos, "a7", "a6");
    let pos = play(&pos, "e4", "e5");
    let pos = play(&pos, "d7", "d5");

    let ep = mv("e5", "d6");
    assert!(is_en_passant_capture(&pos, &ep));
    assert!(is_legal_move(&pos, &ep));

    let after = apply_move(&pos, &ep);
    assert!(after.board.is_empty(sq("d5")));
    assert!(after.board.is_empty(sq("e5")));
    assert_eq!(
        after.board.get(sq("d6")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
}

#[test]
fn test_captured_piece() {
    let pos = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let black_pawn = Some(Piece::new(Color::Black, PieceKind::Pawn));
    assert_eq!(captured_piece(&pos, &mv("e5", "d6")), black_pawn);
    assert_eq!(captured_piece(&pos, &mv("e5", "e6")), None);

    let pos = fen("4k3/8/8/3r4/4P3/8/8/4K3 w - - 0 1");
    assert_eq!(
        captured_piece(&pos, &mv("e4", "d5")),
        Some(Piece::new(Color::Black, PieceKind::Rook))
    );
}

#[test]
fn test_en_passant_expires_after_one_move() {
    let pos = Position::startpos();
    let pos = play(&pos, "e2", "e4");
    let pos = play(&pos, "a7", "a6");
    let pos = play(&pos, "e4", "e5");
    let pos = play(&pos, "d7", "d5");
    let pos = play(&pos, "h2", "h3");
    let pos = play(&pos, "h7", "h6");
    assert!(!is_legal_move(&pos, &mv("e5", "d6")));
}

#[test]
fn test_en_passant_requires_double_step() {
    let pos = fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
    let pos = play(&pos, "d7", "d6");
    let pos = play(&pos, "e1", "e2");
    let pos = play(&pos, "d6", "d5");
    // d6-d5 was a single step, so no en passant.
    assert!(!is_legal_move(&pos, &mv("e5", "d6")));
}

#[test]
fn test_castling_both_sides() {
    let pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(is_legal_move(&pos, &mv("e1", "g1")));
    assert!(is_legal_move(&pos, &mv("e1", "c1")));

    let after = apply_move(&pos, &mv("e1", "g1"));
    assert_eq!(
        after.board.get(sq("f1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert!(after.board.is_empty(sq("h1")));
    assert_eq!(after.castling_rights.white, SideCastling::NONE);
    assert_eq!(after.castling_rights.black, SideCastling::BOTH);

    let after = apply_move(&pos, &mv("e1", "c1"));
    assert_eq!(
        after.board.get(sq("d1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert!(after.board.is_empty(sq("a1")));
}

#[test]
fn test_castling_blocked_path() {
    let pos = fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1");
    assert!(!is_legal_move(&pos, &mv("e1", "g1")));
    assert!(!is_legal_move(&pos, &mv("e1", "c1")));
}

#[test]
fn test_castling_through_attack() {
    // Black rook on f8 covers f1.
    let pos = fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!is_legal_move(&pos, &mv("e1", "g1")));
    assert!(is_legal_move(&pos, &mv("e1", "c1")));
}

#[test]
fn test_castling_out_of_check() {
    let pos = fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!is_legal_move(&pos, &mv("e1", "g1")));
    assert!(!is_legal_move(&pos, &mv("e1", "c1")));
}

#[test]
fn test_castling_rights_stay_revoked() {
    let pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let pos = play(&pos, "e1", "e2");
    let pos = play(&pos, "a8", "a7");
    let pos = play(&pos, "e2", "e1");
    let pos = play(&pos, "a7", "a8");
    assert!(!is_legal_move(&pos, &mv("e1", "g1")));
    assert!(!pos.castling_rights.black.queen_side);
    assert!(pos.castling_rights.black.king_side);
    let pos = play(&pos, "a1", "b1");
    assert!(!is_legal_move(&pos, &mv("e8", "c8")));
    assert!(is_legal_move(&pos, &mv("e8", "g8")));
}

#[test]
fn test_rook_capture_revokes_right() {
    let pos = fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1");
    let pos = play(&pos, "g2", "a8");
    assert!(!pos.castling_rights.black.queen_side);
    assert!(pos.castling_rights.black.king_side);
}

#[test]
fn test_castling_needs_rook_on_home_square() {
    // Rights claim king side but the rook is gone.
    let pos = fen("4k3/8/8/8/8/8/8/R3K3 w KQ - 0 1");
    assert!(!is_legal_move(&pos, &mv("e1", "g1")));
    assert!(is_legal_move(&pos, &mv("e1", "c1")));
}

#[test]
fn test_promotion_is_required_and_strict() {
    let pos = fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    assert!(!is_pseudo_legal(&pos, &mv("e7", "e8")));
    for kind in PieceKind::PROMOTIONS {
        assert!(is_legal_move(
            &pos,
            &Move::with_promotion(sq("e7"), sq("e8"), kind)
        ));
    }
    assert!(!is_legal_move(
        &pos,
        &Move::with_promotion(sq("e7"), sq("e8"), PieceKind::King)
    ));
    // A promotion on a move that does not reach the last rank.
    assert!(!is_legal_move(
        &Position::startpos(),
        &Move::with_promotion(sq("e2"), sq("e4"), PieceKind::Queen)
    ));

    let after = apply_move(&pos, &Move::with_promotion(sq("e7"), sq("e8"), PieceKind::Knight));
    assert_eq!(
        after.board.get(sq("e8")),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
}

#[test]
fn test_apply_move_flips_turn_and_records_last_move() {
    let pos = Position::startpos();
    let m = mv("g1", "f3");
    let after = apply_move(&pos, &m);
    assert_eq!(after.turn, Color::Black);
    assert_eq!(after.last_move, Some(m));
    // Input untouched.
    assert_eq!(pos, Position::startpos());
}

#[test]
fn test_insufficient_material() {
    let kk = Board::from_placement("4k3/8/8/8/8/8/8/4K3").unwrap();
    let kbk = Board::from_placement("4k3/8/8/8/8/8/8/2B1K3").unwrap();
    let knk = Board::from_placement("4k3/8/8/3n4/8/8/8/4K3").unwrap();
    let kbkn = Board::from_placement("4k3/8/8/3n4/8/8/8/2B1K3").unwrap();
    let kpk = Board::from_placement("4k3/8/8/8/8/8/4P3/4K3").unwrap();
    assert!(is_insufficient_material(&kk));
    assert!(is_insufficient_material(&kbk));
    assert!(is_insufficient_material(&knk));
    assert!(!is_insufficient_material(&kbkn));
    assert!(!is_insufficient_material(&kpk));
    assert!(!is_insufficient_material(&Board::standard()));
}
