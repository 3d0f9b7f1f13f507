use super::*;
use crate::settings::GameMode;
use chess_core::{legal_moves, Color, DrawReason};

fn sq(name: &str) -> Coord {
    chess_core::notation::parse_square(name).unwrap()
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

fn play(session: &mut GameSession, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        session.attempt_move(mv(from, to)).unwrap();
    }
}

fn session_at(fen: &str) -> GameSession {
    let mut session = GameSession::default();
    let pos = Position::from_fen(fen).unwrap();
    session.restore(GameState::from_position(&pos)).unwrap();
    session
}

#[test]
fn new_session_starts_from_the_standard_position() {
    let session = GameSession::default();
    assert_eq!(session.position(), Position::startpos());
    assert_eq!(legal_moves(&session.position()).len(), 20);
    assert_eq!(session.status(), GameStatus::Ongoing);
    assert_eq!(
        session.fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn select_then_move() {
    let mut session = GameSession::default();
    let selection = session.select_square(sq("e2"));
    assert_eq!(
        selection,
        Selection::Selected {
            from: sq("e2"),
            destinations: vec![sq("e4"), sq("e3")],
        }
    );
    assert_eq!(session.selected(), Some(sq("e2")));

    let Selection::Moved(record) = session.select_square(sq("e4")) else {
        panic!("expected a move");
    };
    assert_eq!(record.description, "e4");
    assert_eq!(session.selected(), None);
    assert_eq!(session.position().turn, Color::Black);
}

#[test]
fn selecting_another_own_piece_switches_selection() {
    let mut session = GameSession::default();
    session.select_square(sq("e2"));
    let selection = session.select_square(sq("g1"));
    assert!(matches!(selection, Selection::Selected { from, .. } if from == sq("g1")));
}

#[test]
fn clicking_elsewhere_clears() {
    let mut session = GameSession::default();
    assert_eq!(session.select_square(sq("e7")), Selection::Cleared);
    session.select_square(sq("e2"));
    assert_eq!(session.select_square(sq("e5")), Selection::Cleared);
    assert_eq!(session.selected(), None);
    assert!(session.history().is_empty());
}

#[test]
fn illegal_move_changes_nothing() {
    let mut session = GameSession::default();
    let before = session.state().clone();
    let result = session.attempt_move(mv("e2", "e5"));
    assert!(matches!(result, Err(SessionError::IllegalMove(_))));
    let off_board = Move::new(Coord::new(9, 9), Coord::new(4, 4));
    assert!(session.attempt_move(off_board).is_err());
    assert_eq!(session.state(), &before);
}

#[test]
fn undo_then_redo_is_identity() {
    let mut session = GameSession::default();
    play(
        &mut session,
        &[("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4")],
    );
    let after = session.state().clone();

    for _ in 0..3 {
        session.undo().unwrap();
    }
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.redo_len(), 3);

    for _ in 0..3 {
        session.redo().unwrap();
    }
    assert_eq!(session.state(), &after);
    assert_eq!(session.redo_len(), 0);
}

#[test]
fn redo_keeps_remaining_stack_and_new_move_clears_it() {
    let mut session = GameSession::default();
    play(&mut session, &[("e2", "e4"), ("e7", "e5"), ("d2", "d4")]);
    session.undo();
    session.undo();
    assert_eq!(session.redo_len(), 2);
    let redone = session.redo().unwrap();
    assert_eq!(redone.description, "e5");
    assert_eq!(session.redo_len(), 1);

    session.attempt_move(mv("g1", "f3")).unwrap();
    assert_eq!(session.redo_len(), 0);
    assert!(session.redo().is_none());
}

#[test]
fn undo_on_empty_history() {
    let mut session = GameSession::default();
    assert!(session.undo().is_none());
    assert!(session.redo().is_none());
}

#[test]
fn en_passant_and_undo() {
    let mut session = GameSession::default();
    play(
        &mut session,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    assert!(session.legal_destinations(sq("e5")).contains(&sq("d6")));

    let record = session.attempt_move(mv("e5", "d6")).unwrap();
    assert_eq!(record.description, "exd6");
    let pos = session.position();
    assert!(pos.piece_at(sq("d5")).is_none());
    assert!(pos.piece_at(sq("e5")).is_none());

    session.undo().unwrap();
    let pos = session.position();
    assert_eq!(pos.piece_at(sq("d5")).map(|p| p.color), Some(Color::Black));
    assert_eq!(pos.piece_at(sq("e5")).map(|p| p.color), Some(Color::White));
    assert!(pos.piece_at(sq("d6")).is_none());
}

#[test]
fn fools_mate_ends_the_game() {
    let mut session = GameSession::default();
    play(
        &mut session,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
    );
    assert_eq!(session.history()[3].description, "Qh4#");
    assert_eq!(
        session.status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
    assert!(session.state().is_check);
    assert!(legal_moves(&session.position()).is_empty());

    assert!(matches!(
        session.attempt_move(mv("e2", "e3")),
        Err(SessionError::GameOver)
    ));
    assert_eq!(session.select_square(sq("e2")), Selection::Cleared);

    // Undo reopens the game.
    session.undo();
    assert_eq!(session.status(), GameStatus::Ongoing);
}

#[test]
fn check_is_recorded() {
    let mut session = GameSession::default();
    play(&mut session, &[("e2", "e4"), ("f7", "f6"), ("d1", "h5")]);
    assert_eq!(session.history()[2].description, "Qh5+");
    assert_eq!(session.status(), GameStatus::Check);
    assert!(session.state().is_check);
}

#[test]
fn promotion_waits_for_a_piece() {
    let mut session = session_at("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    let selection = session.select_square(sq("a7"));
    assert_eq!(
        selection,
        Selection::Selected {
            from: sq("a7"),
            destinations: vec![sq("a8")],
        }
    );
    assert_eq!(
        session.select_square(sq("a8")),
        Selection::PromotionRequired {
            from: sq("a7"),
            to: sq("a8"),
        }
    );
    assert_eq!(session.pending_promotion(), Some((sq("a7"), sq("a8"))));
    assert!(session.history().is_empty());

    assert!(matches!(
        session.choose_promotion(PieceKind::King),
        Err(SessionError::IllegalMove(_))
    ));
    let record = session.choose_promotion(PieceKind::Knight).unwrap();
    assert_eq!(record.description, "a8=N");
    assert_eq!(
        session.position().piece_at(sq("a8")).map(|p| p.kind),
        Some(PieceKind::Knight)
    );
    assert_eq!(session.pending_promotion(), None);
}

#[test]
fn promotion_can_be_cancelled() {
    let mut session = session_at("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    session.select_square(sq("a7"));
    session.select_square(sq("a8"));
    session.cancel_promotion();
    assert_eq!(session.pending_promotion(), None);
    assert_eq!(session.selected(), None);
    assert!(matches!(
        session.choose_promotion(PieceKind::Queen),
        Err(SessionError::NoPendingPromotion)
    ));
}

#[test]
fn promotion_move_without_piece_is_rejected() {
    let mut session = session_at("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    assert!(matches!(
        session.attempt_move(mv("a7", "a8")),
        Err(SessionError::PromotionRequired)
    ));
    assert!(session.history().is_empty());
}

#[test]
fn knight_shuffle_is_threefold() {
    let mut session = GameSession::default();
    let cycle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    play(&mut session, &cycle);
    assert_eq!(session.status(), GameStatus::Ongoing);
    play(&mut session, &cycle);
    assert_eq!(
        session.status(),
        GameStatus::Draw(DrawReason::ThreefoldRepetition)
    );
    assert!(session.status().is_over());
}

#[test]
fn computer_turns_follow_the_mode() {
    let mut session = GameSession::default();
    assert!(!session.is_computer_turn());
    assert!(session.play_computer_move().is_none());

    session.set_settings(GameSettings {
        mode: GameMode::HumanVsComputer,
        computer_color: Color::Black,
        ..GameSettings::default()
    });
    assert!(!session.is_computer_turn());
    session.attempt_move(mv("e2", "e4")).unwrap();
    assert!(session.is_computer_turn());
    let record = session.play_computer_move().unwrap();
    assert_eq!(record.snapshot.turn, Color::Black);
    assert!(!session.is_computer_turn());
}

#[test]
fn every_level_plays_legal_moves() {
    for level in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut session = GameSession::new(GameSettings {
            mode: GameMode::ComputerVsComputer,
            white_level: level,
            black_level: level,
            ..GameSettings::default()
        });
        for _ in 0..4 {
            let before = session.position();
            let record = session.play_computer_move().unwrap();
            assert!(is_legal_move(&before, &record.mv), "{level:?}");
        }
        assert_eq!(session.history().len(), 4);
    }
}

#[test]
fn hard_level_takes_a_hanging_queen() {
    let mut session = session_at("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
    let mut settings = GameSettings {
        mode: GameMode::ComputerVsComputer,
        white_level: Difficulty::Hard,
        ..GameSettings::default()
    };
    settings.hard.use_alpha_beta = false;
    session.set_settings(settings);
    let record = session.play_computer_move().unwrap();
    assert_eq!(record.description, "Rxd5");
}

#[test]
fn reset_clears_everything() {
    let mut session = GameSession::default();
    play(&mut session, &[("e2", "e4"), ("e7", "e5")]);
    session.undo();
    session.select_square(sq("e4"));
    session.reset();
    assert_eq!(session.position(), Position::startpos());
    assert!(session.history().is_empty());
    assert_eq!(session.redo_len(), 0);
    assert_eq!(session.selected(), None);
}

#[test]
fn unplayable_engine_move_is_rejected() {
    let mut session = GameSession::default();
    let before = session.state().clone();
    assert!(session.play_engine_move(mv("e2", "e5")).is_none());
    assert!(session.play_engine_move(mv("e7", "e5")).is_none());
    assert_eq!(session.state(), &before);

    let record = session.play_engine_move(mv("e2", "e4")).unwrap();
    assert_eq!(record.description, "e4");
}
