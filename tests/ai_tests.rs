//! Opponent integration tests: the membership contract, determinism, and
//! book behavior.

use othello_engine::ai::{Difficulty, OpeningBook, Opponent};
use othello_engine::core::{Coord, Player};
use othello_engine::engine::Game;

fn coord(s: &str) -> Coord {
    s.parse().unwrap()
}

/// Drive a full game where the opponent plays both sides, checking the
/// membership contract at every step. Returns the number of moves played.
fn play_through(mut opponent: Opponent, move_limit: usize) -> usize {
    let mut game = Game::new();
    let mut played = 0;

    while !game.state().game_over && played < move_limit {
        let board = game.board_snapshot();
        let history = game.history();

        match opponent.calculate_move(&board, &history) {
            Some(chosen) => {
                assert!(
                    game.valid_moves().contains(&chosen),
                    "{:?} chose illegal {chosen}",
                    opponent.difficulty()
                );
                game.make_move(chosen).unwrap();
                played += 1;
            }
            None => {
                // "No move" is only ever the signal for an empty move set.
                assert!(game.valid_moves().is_empty());
                break;
            }
        }
    }

    played
}

// =============================================================================
// Membership contract
// =============================================================================

#[test]
fn test_easy_full_game_stays_legal() {
    let moves = play_through(Opponent::with_seed(Difficulty::Easy, 42), 70);
    assert!(moves > 0);
}

#[test]
fn test_medium_full_game_stays_legal() {
    let moves = play_through(Opponent::new(Difficulty::Medium), 70);
    assert!(moves > 0);
}

#[test]
fn test_hard_opening_moves_stay_legal() {
    // Bounded run: depth-4 search on every ply of a full game is slow for
    // a unit suite.
    let moves = play_through(Opponent::new(Difficulty::Hard), 8);
    assert_eq!(moves, 8);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_easy_is_reproducible_with_a_seed() {
    let run = |seed| {
        let mut game = Game::new();
        let mut opponent = Opponent::with_seed(Difficulty::Easy, seed);
        let mut line = Vec::new();

        for _ in 0..12 {
            let board = game.board_snapshot();
            let Some(chosen) = opponent.calculate_move(&board, &game.history()) else {
                break;
            };
            game.make_move(chosen).unwrap();
            line.push(chosen);
        }
        line
    };

    assert_eq!(run(9), run(9));
}

#[test]
fn test_medium_is_deterministic() {
    let mut game = Game::new();
    let board = game.board_snapshot();

    let mut a = Opponent::new(Difficulty::Medium);
    let mut b = Opponent::new(Difficulty::Medium);
    let first = a.calculate_move(&board, &[]);
    assert_eq!(first, b.calculate_move(&board, &[]));

    // Greedy ties break toward the first cell in scan order.
    assert_eq!(first, Some(coord("d3")));
    game.make_move(first.unwrap()).unwrap();
}

// =============================================================================
// Opening book
// =============================================================================

#[test]
fn test_hard_follows_the_book_line() {
    let mut game = Game::new();
    let mut opponent = Opponent::new(Difficulty::Hard);

    // Book line from the fresh position: d3, then c5 as the reply, then f6.
    for expected in ["d3", "c5", "f6"] {
        let chosen = opponent
            .calculate_move(&game.board_snapshot(), &game.history())
            .unwrap();
        assert_eq!(chosen, coord(expected));
        game.make_move(chosen).unwrap();
    }
}

#[test]
fn test_book_replies_are_legal_in_their_positions() {
    let book = OpeningBook::standard();
    assert!(!book.is_empty());

    let mut game = Game::new();
    // Walk the main line; at each step the probe result must be legal.
    loop {
        let Some(reply) = book.probe(&game.history()) else {
            break;
        };
        assert!(game.valid_moves().contains(&reply));
        game.make_move(reply).unwrap();
    }

    // The main line is three plies deep.
    assert_eq!(game.history().len(), 3);
}

// =============================================================================
// Pass signaling
// =============================================================================

#[test]
fn test_opponent_signals_pass_on_terminal_position() {
    use othello_engine::core::{Board, Cell};

    let mut cells = [[Cell::Black; 8]; 8];
    cells[0][0] = Cell::Empty;
    let board = Board::from_cells(cells);

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut opponent = Opponent::with_seed(difficulty, 1);
        assert_eq!(
            opponent.calculate_move(&board, &[]),
            None,
            "{difficulty:?} must signal no-move"
        );
    }
}

// =============================================================================
// Mixed-tier games
// =============================================================================

#[test]
fn test_hard_vs_random_game_runs_to_completion() {
    let mut game = Game::new();
    let mut hard = Opponent::new(Difficulty::Hard);
    let mut easy = Opponent::with_seed(Difficulty::Easy, 1234);

    let mut guard = 0;
    while !game.state().game_over && guard < 70 {
        let board = game.board_snapshot();
        let history = game.history();
        let mover = board.turn();

        let chosen = match mover {
            Player::Black => hard.calculate_move(&board, &history),
            Player::White => easy.calculate_move(&board, &history),
        };

        match chosen {
            Some(c) => {
                assert!(game.valid_moves().contains(&c), "{mover} chose illegal {c}");
                game.make_move(c).unwrap();
            }
            None => break,
        }
        guard += 1;
    }

    let state = game.state();
    assert!(state.game_over, "game did not finish within the guard");
    assert!(state.score.total() <= 64);
    // The reported winner matches the final disc counts (or the tie).
    assert_eq!(state.winner, state.score.leader());
}
