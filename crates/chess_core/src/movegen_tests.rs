use super::*;
use crate::notation::parse_square;
use crate::rules::{apply_move, is_king_in_check};

fn sq(name: &str) -> Coord {
    parse_square(name).unwrap()
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
}

#[test]
fn test_generation_order_is_row_major() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Row 6 pawns come before the row 7 knights.
    assert_eq!(moves[0], Move::new(sq("a2"), sq("a4")));
    assert_eq!(moves[1], Move::new(sq("a2"), sq("a3")));
    let last = moves[moves.len() - 1];
    assert_eq!(last.from, sq("g1"));
    assert_eq!(last.to, sq("h3"));
}

#[test]
fn test_every_legal_move_keeps_king_safe() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    for mv in legal_moves(&pos) {
        let next = apply_move(&pos, &mv);
        assert!(!is_king_in_check(&next.board, pos.turn), "{mv:?}");
    }
}

#[test]
fn test_promotions_expand_to_four() {
    let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - -").unwrap();
    let promos: Vec<Move> = legal_moves_from(&pos, sq("e7"));
    assert_eq!(
        promos.iter().map(|m| m.promotion).collect::<Vec<_>>(),
        vec![
            Some(PieceKind::Queen),
            Some(PieceKind::Rook),
            Some(PieceKind::Bishop),
            Some(PieceKind::Knight)
        ]
    );

    let computer: Vec<Move> = computer_moves(&pos)
        .into_iter()
        .filter(|m| m.from == sq("e7"))
        .collect();
    assert_eq!(computer.len(), 1);
    assert_eq!(computer[0].promotion, Some(PieceKind::Queen));
}

#[test]
fn test_legal_moves_from_other_side_is_empty() {
    let pos = Position::startpos();
    assert!(legal_moves_from(&pos, sq("e7")).is_empty());
    assert!(legal_moves_from(&pos, sq("e4")).is_empty());
    assert_eq!(legal_moves_from(&pos, sq("g1")).len(), 2);
}

#[test]
fn test_legal_moves_into_reuses_buffer() {
    let pos = Position::startpos();
    let mut buf = vec![Move::new(sq("a1"), sq("a2")); 5];
    legal_moves_into(&pos, &mut buf);
    assert_eq!(buf, legal_moves(&pos));
}

#[test]
fn test_fools_mate_is_checkmate() {
    let pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq -")
        .unwrap();
    assert!(is_checkmate(&pos));
    assert!(!is_stalemate(&pos));
    assert!(!has_legal_move(&pos));
    assert!(legal_moves(&pos).is_empty());
}

#[test]
fn test_stalemate_detection() {
    let pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - -").unwrap();
    assert!(is_stalemate(&pos));
    assert!(!is_checkmate(&pos));
}

#[test]
fn test_has_legal_move_in_startpos() {
    assert!(has_legal_move(&Position::startpos()));
}
