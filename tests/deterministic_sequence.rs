use std::collections::HashSet;
use std::time::Duration;

use arcade_snake::config::{GameConfig, GridSize, MIN_TICK_INTERVAL_MS};
use arcade_snake::difficulty::Difficulty;
use arcade_snake::game::{GameSession, SessionState, TickOutcome};
use arcade_snake::input::Direction;
use arcade_snake::snake::{DeathReason, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn session(width: u16, height: u16, difficulty: Difficulty, seed: u64) -> GameSession {
    let config = GameConfig::new(width, height, difficulty, Some(seed)).expect("valid config");
    GameSession::new(config, 0)
}

fn segments(game: &GameSession) -> Vec<Position> {
    game.snake().segments().copied().collect()
}

/// Puts primary food directly ahead of the head and ticks once.
fn eat_food_ahead(game: &mut GameSession) -> TickOutcome {
    let ahead = game.snake().head().step(game.snake().direction());
    game.place_food(ahead);
    game.tick()
}

#[test]
fn four_ticks_reach_food_on_the_starting_row() {
    let mut game = session(20, 20, Difficulty::Medium, 42);
    assert_eq!(
        segments(&game),
        vec![
            Position::new(6, 10),
            Position::new(5, 10),
            Position::new(4, 10),
        ]
    );

    game.start();
    game.place_food(Position::new(10, 10));

    for _ in 0..3 {
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.snake().len(), 3);
    }
    assert_eq!(game.tick(), TickOutcome::AteFood { leveled_up: false });

    assert_eq!(game.snake().head(), Position::new(10, 10));
    assert_eq!(game.score(), 10);
    assert_eq!(game.snake().len(), 4);
    assert_eq!(game.snake().tail(), Some(Position::new(7, 10)));
    assert_ne!(game.food(), Position::new(10, 10));
}

#[test]
fn reverse_request_is_ignored() {
    let mut game = session(20, 20, Difficulty::Medium, 1);
    game.start();
    game.place_food(Position::new(0, 0));

    assert!(!game.set_pending_direction(Direction::Left));
    game.tick();

    assert_eq!(game.snake().head(), Position::new(7, 10));
    assert_eq!(game.snake().direction(), Direction::Right);
}

#[test]
fn leaving_the_grid_ends_the_session_for_good() {
    let mut game = session(20, 20, Difficulty::Medium, 2);
    game.start();
    game.place_food(Position::new(0, 0));
    game.set_pending_direction(Direction::Up);

    let mut outcome = TickOutcome::Moved;
    for _ in 0..20 {
        outcome = game.tick();
        if outcome != TickOutcome::Moved {
            break;
        }
    }

    assert_eq!(outcome, TickOutcome::Crashed(DeathReason::WallCollision));
    assert_eq!(game.state(), SessionState::GameOver);
    assert!(!game.is_ticking());
    assert_eq!(game.snake().head(), Position::new(6, 0));

    let (score, level, body) = (game.score(), game.level(), segments(&game));
    assert_eq!(game.tick(), TickOutcome::Ignored);
    assert_eq!(game.update(Duration::from_secs(10)), 0);
    assert!(!game.start());
    assert_eq!((game.score(), game.level(), segments(&game)), (score, level, body));

    game.reset();
    assert_eq!(game.state(), SessionState::NotStarted);
    assert!(game.start());
}

#[test]
fn reset_twice_from_paused_is_idempotent() {
    let mut game = session(20, 20, Difficulty::Hard, 3);
    game.start();
    eat_food_ahead(&mut game);
    game.place_bonus_food(Position::new(1, 1));
    game.pause();

    game.reset();
    let first = (
        segments(&game),
        game.score(),
        game.level(),
        game.speed_ms(),
        game.state(),
    );
    assert!(game.bonus_food().is_none());
    assert!(game.particles().is_empty());

    game.reset();
    let second = (
        segments(&game),
        game.score(),
        game.level(),
        game.speed_ms(),
        game.state(),
    );

    assert_eq!(first, second);
    assert_eq!(first.1, 0);
    assert_eq!(first.2, 1);
    assert_eq!(first.3, 80);
    assert_eq!(first.4, SessionState::NotStarted);
}

#[test]
fn speed_shortens_per_food_until_the_floor() {
    let mut game = session(100, 100, Difficulty::Hard, 4);
    game.start();

    let mut previous = game.speed_ms();
    for _ in 0..20 {
        assert!(matches!(eat_food_ahead(&mut game), TickOutcome::AteFood { .. }));
        let speed = game.speed_ms();

        if previous > MIN_TICK_INTERVAL_MS {
            assert!(speed < previous);
        } else {
            assert_eq!(speed, MIN_TICK_INTERVAL_MS);
        }
        assert!(speed >= MIN_TICK_INTERVAL_MS);
        previous = speed;
    }

    assert_eq!(game.speed_ms(), MIN_TICK_INTERVAL_MS);
    assert_eq!(game.snake().len(), 23);
}

#[test]
fn level_rises_once_per_fifty_point_crossing() {
    let mut game = session(20, 20, Difficulty::Medium, 5);
    game.start();

    for _ in 0..4 {
        assert_eq!(
            eat_food_ahead(&mut game),
            TickOutcome::AteFood { leveled_up: false }
        );
    }
    assert_eq!((game.score(), game.level()), (40, 1));

    // 40 + 30 crosses 50 without landing on it.
    let ahead = game.snake().head().step(Direction::Right);
    game.place_food(Position::new(0, 0));
    game.place_bonus_food(ahead);
    assert_eq!(game.tick(), TickOutcome::AteBonus { leveled_up: true });
    assert_eq!((game.score(), game.level()), (70, 2));
    assert!(game.bonus_food().is_none());

    eat_food_ahead(&mut game);
    eat_food_ahead(&mut game);
    assert_eq!((game.score(), game.level()), (90, 2));

    assert_eq!(
        eat_food_ahead(&mut game),
        TickOutcome::AteFood { leveled_up: true }
    );
    assert_eq!((game.score(), game.level()), (100, 3));
    assert_eq!(game.high_score(), 100);
}

#[test]
fn bonus_food_expires_on_the_session_clock() {
    let mut game = session(100, 100, Difficulty::Medium, 6);
    game.start();
    game.place_bonus_food(Position::new(50, 10));

    game.update(Duration::from_millis(6_900));
    let bonus = game.snapshot().bonus.expect("bonus should still be visible");
    assert!(bonus.remaining > 0.0 && bonus.remaining < 0.05);

    game.update(Duration::from_millis(200));
    assert!(game.bonus_food().is_none());
    assert!(game.snapshot().bonus.is_none());
}

#[test]
fn bonus_timer_is_frozen_while_paused() {
    let mut game = session(100, 100, Difficulty::Hard, 7);
    game.start();
    game.place_bonus_food(Position::new(50, 10));
    game.update(Duration::from_secs(2));

    game.pause();
    game.update(Duration::from_secs(60));
    assert!(game.bonus_food().is_some());

    game.start();
    game.update(Duration::from_millis(2_900));
    assert!(game.bonus_food().is_some());
    game.update(Duration::from_millis(200));
    assert!(game.bonus_food().is_none());
}

#[test]
fn stale_bonus_timer_cannot_touch_a_new_session() {
    let mut game = session(100, 100, Difficulty::Medium, 8);
    game.start();
    game.place_bonus_food(Position::new(50, 10));
    game.update(Duration::from_secs(3));

    game.reset();
    game.start();
    game.update(Duration::from_secs(2));
    game.place_bonus_food(Position::new(50, 10));

    // The first bonus would have expired 7 s after it was placed.
    game.update(Duration::from_millis(2_500));
    assert!(game.bonus_food().is_some());

    game.update(Duration::from_millis(4_600));
    assert!(game.bonus_food().is_none());
}

#[test]
fn random_play_keeps_board_invariants() {
    let mut steering = StdRng::seed_from_u64(99);
    let bounds = GridSize {
        width: 12,
        height: 12,
    };
    let mut game = session(bounds.width, bounds.height, Difficulty::Hard, 10);
    let directions = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
    let mut crashes = 0;

    game.start();
    for _ in 0..5_000 {
        let before_len = game.snake().len();
        let before_score = game.score();
        let before_direction = game.snake().direction();
        let had_bonus = game.bonus_food().is_some();

        game.set_pending_direction(directions[steering.gen_range(0..directions.len())]);
        let outcome = game.tick();

        match outcome {
            TickOutcome::Moved => assert_eq!(game.snake().len(), before_len),
            TickOutcome::AteFood { .. } => {
                assert_eq!(game.snake().len(), before_len + 1);
                assert_eq!(game.score(), before_score + 10);
            }
            TickOutcome::AteBonus { .. } => {
                assert!(had_bonus);
                assert_eq!(game.score(), before_score + 50);
                assert!(game.bonus_food().is_none());
            }
            TickOutcome::Crashed(_) => {
                crashes += 1;
                game.reset();
                game.start();
                continue;
            }
            TickOutcome::Ignored => panic!("running session ignored a tick"),
        }

        assert_ne!(game.snake().direction(), before_direction.opposite());

        let body: HashSet<Position> = game.snake().segments().copied().collect();
        assert_eq!(body.len(), game.snake().len(), "snake overlaps itself");
        assert!(body.iter().all(|cell| cell.is_within_bounds(bounds)));
        assert!(!body.contains(&game.food()));
        if let Some(bonus) = game.bonus_food() {
            assert_ne!(bonus.position, game.food());
            assert!(!body.contains(&bonus.position));
        }
    }

    assert!(crashes > 0);
}
