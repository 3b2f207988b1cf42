//! Game-engine integration tests: events, undo/redo, reset, and
//! persistence.

use std::cell::RefCell;
use std::rc::Rc;

use othello_engine::core::{Board, Cell, Coord, GameError, PerPlayer, Player, Score};
use othello_engine::engine::{EventKind, Game, GameEvent, GameStatus, SavedGame, StateAction};

fn coord(s: &str) -> Coord {
    s.parse().unwrap()
}

// =============================================================================
// Moves and events
// =============================================================================

#[test]
fn test_successful_move_emits_move_then_state_change() {
    let mut game = Game::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let order_move = Rc::clone(&order);
    game.on(EventKind::Move, move |event| {
        if let GameEvent::Move { record, state } = event {
            assert_eq!(record.coord, coord("d3"));
            assert_eq!(record.player, Player::Black);
            assert_eq!(record.score, Score::new(4, 1));
            assert_eq!(state.current_player, Player::White);
            order_move.borrow_mut().push("move");
        }
    });

    let order_change = Rc::clone(&order);
    game.on(EventKind::StateChange, move |event| {
        if let GameEvent::StateChange { action, .. } = event {
            assert_eq!(*action, StateAction::Move);
            order_change.borrow_mut().push("state_change");
        }
    });

    game.make_move(coord("d3")).unwrap();
    assert_eq!(*order.borrow(), vec!["move", "state_change"]);
}

#[test]
fn test_invalid_move_emits_event_and_leaves_board_unchanged() {
    // Scenario C: playing on an occupied starting cell.
    let mut game = Game::new();
    let before = game.state();

    let reasons = Rc::new(RefCell::new(Vec::new()));
    let reasons_handle = Rc::clone(&reasons);
    game.on(EventKind::InvalidMove, move |event| {
        if let GameEvent::InvalidMove { coord, reason } = event {
            reasons_handle
                .borrow_mut()
                .push((*coord, reason.clone()));
        }
    });

    let err = game.make_move(coord("d4")).unwrap_err();
    assert!(matches!(err, GameError::InvalidMove { .. }));

    assert_eq!(
        *reasons.borrow(),
        vec![(coord("d4"), "cell occupied".to_string())]
    );
    assert_eq!(game.state(), before);
}

#[test]
fn test_move_history_grows_monotonically() {
    let mut game = Game::new();

    game.make_move(coord("d3")).unwrap();
    game.make_move(coord("c5")).unwrap();

    let history = game.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].player, Player::Black);
    assert_eq!(history[0].notation(), "d3");
    assert_eq!(history[1].player, Player::White);
    assert_eq!(history[1].notation(), "c5");
}

#[test]
fn test_game_over_fires_once_with_winner() {
    // One black move flips the only white disc; nobody can move after.
    let mut cells = [[Cell::Empty; 8]; 8];
    cells[0][1] = Cell::White; // b1
    cells[0][2] = Cell::Black; // c1

    let mut game = Game::new();
    let saved = SavedGame {
        board: Board::from_cells(cells),
        history: Vec::new(),
        players: PerPlayer::new(None, None),
        clock: None,
    };
    game.import_state(&serde_json::to_string(&saved).unwrap())
        .unwrap();

    let winners = Rc::new(RefCell::new(Vec::new()));
    let winners_handle = Rc::clone(&winners);
    game.on(EventKind::GameOver, move |event| {
        if let GameEvent::GameOver { winner, state } = event {
            assert!(state.game_over);
            winners_handle.borrow_mut().push(*winner);
        }
    });

    game.make_move(coord("a1")).unwrap();

    assert_eq!(*winners.borrow(), vec![Some(Player::Black)]);
    assert_eq!(
        game.status(),
        GameStatus::Over {
            winner: Some(Player::Black)
        }
    );

    // The terminal state rejects further moves.
    let err = game.make_move(coord("d5")).unwrap_err();
    assert!(matches!(err, GameError::InvalidMove { .. }));
}

#[test]
fn test_unsubscribed_listener_stops_firing() {
    let mut game = Game::new();
    let count = Rc::new(RefCell::new(0));

    let count_handle = Rc::clone(&count);
    let id = game.on(EventKind::Move, move |_| *count_handle.borrow_mut() += 1);

    game.make_move(coord("d3")).unwrap();
    assert_eq!(*count.borrow(), 1);

    assert!(game.off(EventKind::Move, id));
    game.make_move(coord("c5")).unwrap();
    assert_eq!(*count.borrow(), 1);
}

// =============================================================================
// Undo / redo
// =============================================================================

#[test]
fn test_undo_restores_pre_move_state_exactly() {
    let mut game = Game::new();
    let before = game.state();

    game.make_move(coord("d3")).unwrap();
    let after = game.state();
    assert_ne!(before, after);

    game.undo().unwrap();
    assert_eq!(game.state(), before);
}

#[test]
fn test_redo_restores_post_move_state_exactly() {
    let mut game = Game::new();

    game.make_move(coord("d3")).unwrap();
    let after = game.state();

    game.undo().unwrap();
    game.redo().unwrap();
    assert_eq!(game.state(), after);
}

#[test]
fn test_undo_redo_empty_stacks_fail() {
    let mut game = Game::new();

    assert!(matches!(game.undo(), Err(GameError::NothingToUndo)));
    assert!(matches!(game.redo(), Err(GameError::NothingToRedo)));
}

#[test]
fn test_new_move_clears_redo_stack() {
    let mut game = Game::new();

    game.make_move(coord("d3")).unwrap();
    game.undo().unwrap();

    game.make_move(coord("c4")).unwrap();
    assert!(matches!(game.redo(), Err(GameError::NothingToRedo)));
}

#[test]
fn test_undo_depth_follows_every_move() {
    let mut game = Game::new();
    let initial = game.state();

    for m in ["d3", "c5", "f6"] {
        game.make_move(coord(m)).unwrap();
    }

    for _ in 0..3 {
        game.undo().unwrap();
    }
    assert_eq!(game.state(), initial);
    assert!(game.undo().is_err());
}

#[test]
fn test_rejected_move_discards_its_snapshot() {
    let mut game = Game::new();

    game.make_move(coord("d3")).unwrap();
    let after = game.state();

    // The invalid attempt must not add an undo level.
    assert!(game.make_move(coord("a1")).is_err());
    game.undo().unwrap();
    assert_ne!(game.state(), after);
    assert!(game.undo().is_err());
}

#[test]
fn test_undo_redo_emit_tagged_state_changes() {
    let mut game = Game::new();
    let actions = Rc::new(RefCell::new(Vec::new()));

    let actions_handle = Rc::clone(&actions);
    game.on(EventKind::StateChange, move |event| {
        if let GameEvent::StateChange { action, .. } = event {
            actions_handle.borrow_mut().push(*action);
        }
    });

    game.make_move(coord("d3")).unwrap();
    game.undo().unwrap();
    game.redo().unwrap();

    assert_eq!(
        *actions.borrow(),
        vec![StateAction::Move, StateAction::Undo, StateAction::Redo]
    );
}

// =============================================================================
// Reset
// =============================================================================

#[test]
fn test_reset_returns_to_fresh_state() {
    let mut game = Game::builder().black_player("Ada").build();

    game.make_move(coord("d3")).unwrap();
    game.make_move(coord("c5")).unwrap();
    game.reset();

    let state = game.state();
    assert_eq!(state.score, Score::new(2, 2));
    assert_eq!(state.current_player, Player::Black);
    assert!(state.history.is_empty());
    assert!(!state.game_over);
    // Player identifiers survive a reset.
    assert_eq!(state.players.black.as_deref(), Some("Ada"));

    // Both stacks are gone.
    assert!(game.undo().is_err());
    assert!(game.redo().is_err());
}

// =============================================================================
// State views
// =============================================================================

#[test]
fn test_state_is_idempotent() {
    let mut game = Game::new();
    game.make_move(coord("d3")).unwrap();

    assert_eq!(game.state(), game.state());
}

#[test]
fn test_state_exposes_copies_not_the_live_board() {
    let mut game = Game::new();

    let mut view_board = game.state().board;
    view_board.take_turn(coord("d3")).unwrap();

    // The engine's board is unaffected by mutating the view's copy.
    assert_eq!(game.state().score, Score::new(2, 2));
    assert_eq!(game.board_snapshot(), Board::new());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_export_import_round_trip() {
    let mut original = Game::builder()
        .black_player("Ada")
        .white_player("Grace")
        .build();

    for m in ["d3", "c5", "f6"] {
        original.make_move(coord(m)).unwrap();
    }

    let text = original.export_state().unwrap();

    let mut restored = Game::new();
    restored.import_state(&text).unwrap();

    assert_eq!(restored.state(), original.state());
}

#[test]
fn test_import_emits_tagged_state_change() {
    let mut source = Game::new();
    source.make_move(coord("d3")).unwrap();
    let text = source.export_state().unwrap();

    let mut game = Game::new();
    let actions = Rc::new(RefCell::new(Vec::new()));
    let actions_handle = Rc::clone(&actions);
    game.on(EventKind::StateChange, move |event| {
        if let GameEvent::StateChange { action, .. } = event {
            actions_handle.borrow_mut().push(*action);
        }
    });

    game.import_state(&text).unwrap();
    assert_eq!(*actions.borrow(), vec![StateAction::Import]);
}

#[test]
fn test_malformed_import_leaves_state_untouched() {
    let mut game = Game::new();
    game.make_move(coord("d3")).unwrap();
    let before = game.state();

    for text in ["", "not json", "{\"board\": 17}", "[1,2,3]"] {
        let err = game.import_state(text).unwrap_err();
        assert!(matches!(err, GameError::MalformedImport(_)), "{text:?}");
        assert_eq!(game.state(), before, "state mutated by {text:?}");
    }
}

#[test]
fn test_import_with_out_of_range_history_coord_is_rejected() {
    // Take a valid document and corrupt one history coordinate; the
    // range check must reject it before any state changes.
    let mut source = Game::new();
    source.make_move(coord("d3")).unwrap();
    let mut doc: serde_json::Value =
        serde_json::from_str(&source.export_state().unwrap()).unwrap();
    doc["history"][0]["coord"] = serde_json::json!([12, 3]);
    let text = doc.to_string();

    let mut game = Game::new();
    let before = game.state();

    assert!(matches!(
        game.import_state(&text),
        Err(GameError::MalformedImport(_))
    ));
    assert_eq!(game.state(), before);
}

#[test]
fn test_import_clears_snapshot_stacks() {
    let mut source = Game::new();
    source.make_move(coord("d3")).unwrap();
    let text = source.export_state().unwrap();

    let mut game = Game::new();
    game.make_move(coord("c4")).unwrap();

    game.import_state(&text).unwrap();
    assert!(matches!(game.undo(), Err(GameError::NothingToUndo)));
}
