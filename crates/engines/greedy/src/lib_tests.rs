use super::*;
use chess_core::{legal_moves, Coord, PieceKind};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

#[test]
fn greedy_engine_returns_legal_move() {
    let mut engine = GreedyEngine::with_seed(7);
    let pos = Position::startpos();

    let result = engine.search(&pos, SearchLimits::depth(1));

    let mv = result.best_move.unwrap();
    assert!(legal_moves(&pos).contains(&mv));
    assert_eq!(result.score, 0);
}

#[test]
fn greedy_engine_takes_the_queen() {
    // The knight on c3 can take a pawn on d5 or the queen on b5.
    let pos = pos("4k3/8/8/1q1p4/8/2N5/8/4K3 w - - 0 1");
    for seed in 0..10 {
        let mut engine = GreedyEngine::with_seed(seed);
        let result = engine.search(&pos, SearchLimits::depth(1));
        let mv = result.best_move.unwrap();
        assert_eq!(mv.to, Coord::new(3, 1));
        assert_eq!(result.score, 9);
    }
}

#[test]
fn greedy_ties_are_all_candidates() {
    let pos = pos("4k3/8/8/1p1p4/8/2N5/8/4K3 w - - 0 1");
    let moves = computer_moves(&pos);
    let best = best_captures(&pos, &moves);
    assert_eq!(best.len(), 2);
    assert!(best.iter().all(|mv| capture_value(&pos, mv) == 1));
}

#[test]
fn greedy_same_seed_same_choice() {
    let pos = Position::startpos();
    let a = GreedyEngine::with_seed(42).search(&pos, SearchLimits::depth(1));
    let b = GreedyEngine::with_seed(42).search(&pos, SearchLimits::depth(1));
    assert_eq!(a.best_move, b.best_move);
}

#[test]
fn greedy_engine_promotes_to_queen() {
    let pos = pos("7k/P7/8/8/8/8/8/K7 w - - 0 1");
    for seed in 0..10 {
        let result = GreedyEngine::with_seed(seed).search(&pos, SearchLimits::depth(1));
        let mv = result.best_move.unwrap();
        assert!(mv.promotion.is_none() || mv.promotion == Some(PieceKind::Queen));
    }
}

#[test]
fn greedy_engine_handles_checkmate() {
    let mut engine = GreedyEngine::with_seed(1);
    let pos = pos("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");

    let result = engine.search(&pos, SearchLimits::depth(1));

    assert!(result.best_move.is_none());
}

#[test]
fn greedy_engine_handles_stalemate() {
    let mut engine = GreedyEngine::with_seed(1);
    let pos = pos("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");

    let result = engine.search(&pos, SearchLimits::depth(1));

    assert!(result.best_move.is_none());
}

#[test]
fn greedy_engine_counts_en_passant_as_capture() {
    // exd6 en passant is the only capture.
    let pos = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let ep = chess_core::Move::new(Coord::new(3, 4), Coord::new(2, 3));
    assert_eq!(capture_value(&pos, &ep), 1);
    for seed in 0..20 {
        let result = GreedyEngine::with_seed(seed).search(&pos, SearchLimits::depth(1));
        assert_eq!(result.best_move, Some(ep));
        assert_eq!(result.score, 1);
    }
}
