use std::collections::HashSet;
use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{
    BONUS_PARTICLES, CRASH_PARTICLES, FOOD_PARTICLES, FOOD_POINTS, GAME_OVER_FADE_INCREMENT,
    GAME_OVER_FADE_MAX, GAME_OVER_FADE_STEP, GameConfig, GridSize, LEVEL_UP_PARTICLES,
    MAX_FRAME_DELTA, MIN_TICK_INTERVAL_MS, POINTS_PER_LEVEL,
};
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::food::{BonusFood, spawn_position};
use crate::input::Direction;
use crate::particles::{ParticleKind, ParticleSystem};
use crate::snake::{DeathReason, Position, Snake};
use crate::snapshot::{BonusView, Snapshot};
use crate::timers::{TimerKind, Timers};

/// Lifecycle of one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionState {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The session was not running.
    Ignored,
    Moved,
    AteFood { leveled_up: bool },
    AteBonus { leveled_up: bool },
    Crashed(DeathReason),
}

/// Fixed-interval tick cadence, driven by elapsed session time.
#[derive(Debug, Clone, Copy)]
struct TickDriver {
    interval: Duration,
    elapsed: Duration,
    running: bool,
}

impl TickDriver {
    fn stopped() -> Self {
        Self {
            interval: Duration::from_millis(MIN_TICK_INTERVAL_MS),
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    fn start(&mut self, interval: Duration) {
        self.interval = interval;
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    fn stop(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = false;
    }

    fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    fn elapse(&mut self, step: Duration) {
        if self.running {
            self.elapsed += step;
        }
    }

    fn take_due(&mut self) -> bool {
        if self.running && self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }
}

/// One game session: snake, food, scoring, timers and particles.
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: GridSize,
    difficulty: Difficulty,
    queued_difficulty: Option<Difficulty>,
    state: SessionState,
    snake: Snake,
    food: Position,
    bonus: Option<BonusFood>,
    particles: ParticleSystem,
    score: u32,
    level: u32,
    speed_ms: u64,
    high_score: u32,
    death_reason: Option<DeathReason>,
    game_over_fade: f32,
    /// Time spent running or fading out; frozen while idle or paused.
    clock: Duration,
    driver: TickDriver,
    timers: Timers,
    rng: StdRng,
}

impl GameSession {
    /// Creates an initialized, not yet started session.
    #[must_use]
    pub fn new(config: GameConfig, high_score: u32) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut session = Self {
            grid: config.grid,
            difficulty: config.difficulty,
            queued_difficulty: None,
            state: SessionState::NotStarted,
            snake: Snake::starting(config.grid),
            food: Position::new(0, 0),
            bonus: None,
            particles: ParticleSystem::new(),
            score: 0,
            level: 1,
            speed_ms: config.difficulty.profile().initial_speed_ms,
            high_score,
            death_reason: None,
            game_over_fade: 0.0,
            clock: Duration::ZERO,
            driver: TickDriver::stopped(),
            timers: Timers::new(),
            rng,
        };
        session.initialize();
        session
    }

    /// Starts or resumes play. Returns false when the session cannot run.
    pub fn start(&mut self) -> bool {
        match self.state {
            SessionState::NotStarted | SessionState::Paused => {
                info!(
                    "session {} ({}, {} ms/tick)",
                    if self.state == SessionState::Paused {
                        "resumed"
                    } else {
                        "started"
                    },
                    self.difficulty,
                    self.speed_ms
                );
                self.state = SessionState::Running;
                self.driver.start(self.tick_interval());
                true
            }
            SessionState::Running | SessionState::GameOver => false,
        }
    }

    /// Suspends a running session, preserving all state.
    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }

        self.state = SessionState::Paused;
        self.driver.stop();
        info!("session paused at score {}", self.score);
        true
    }

    /// Reinitializes the board without starting play.
    ///
    /// Pending scheduled events from the previous board are invalidated.
    pub fn reset(&mut self) {
        self.timers.invalidate_all();
        self.driver.stop();
        if let Some(difficulty) = self.queued_difficulty.take() {
            self.difficulty = difficulty;
        }

        self.initialize();
        self.state = SessionState::NotStarted;
        info!(
            "session reset ({}, timer generation {})",
            self.difficulty,
            self.timers.generation()
        );
    }

    /// Selects a difficulty.
    ///
    /// Applies immediately with a reset unless the session is running, in
    /// which case the change waits for the next reset.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty == self.difficulty && self.queued_difficulty.is_none() {
            return;
        }

        if self.state == SessionState::Running {
            self.queued_difficulty = (difficulty != self.difficulty).then_some(difficulty);
            debug!("difficulty {difficulty} queued until next reset");
            return;
        }

        self.queued_difficulty = None;
        self.difficulty = difficulty;
        self.reset();
    }

    /// Latches a direction for the next tick. Reversals are ignored.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.state == SessionState::GameOver {
            return false;
        }

        self.snake.set_pending_direction(direction)
    }

    /// Advances the session clock by `elapsed`, firing due timers and ticks
    /// in chronological order. Returns the number of ticks run.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        let mut remaining = elapsed;
        let mut ticks = 0;

        while !remaining.is_zero() && self.clock_is_running() {
            let mut step = remaining;
            if self.driver.running {
                step = step.min(self.driver.until_next());
            }
            if let Some(due) = self.timers.next_due() {
                step = step.min(due.saturating_sub(self.clock));
            }

            self.clock += step;
            remaining -= step;
            self.driver.elapse(step);

            self.fire_due_timers();
            if self.driver.take_due() {
                self.tick();
                ticks += 1;
            }
        }

        ticks
    }

    /// Feeds one frame of wall-clock time into the session.
    ///
    /// Gaps longer than `MAX_FRAME_DELTA` (suspends, slow draws) are cut
    /// short so the snake never replays a backlog of moves without input.
    pub fn update_frame(&mut self, elapsed: Duration) -> u32 {
        self.update(elapsed.min(MAX_FRAME_DELTA))
    }

    /// Runs one simulation step. Does nothing unless the session is running.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != SessionState::Running {
            return TickOutcome::Ignored;
        }

        let candidate = self.snake.commit_direction();
        if let Some(reason) = self.snake.collision_at(candidate, self.grid) {
            self.game_over(reason);
            return TickOutcome::Crashed(reason);
        }

        let ate_food = candidate == self.food;
        let ate_bonus = !ate_food && self.bonus.is_some_and(|bonus| bonus.position == candidate);
        self.snake.advance(candidate, ate_food || ate_bonus);

        let outcome = if ate_food {
            TickOutcome::AteFood {
                leveled_up: self.eat_food(),
            }
        } else if ate_bonus {
            TickOutcome::AteBonus {
                leveled_up: self.eat_bonus(),
            }
        } else {
            TickOutcome::Moved
        };

        self.particles.advance();
        if let Some(bonus) = self.bonus.as_mut() {
            bonus.pulse.advance();
        }

        outcome
    }

    /// Builds the read-only view for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            snake: &self.snake,
            food: self.food,
            bonus: self.bonus.map(|bonus| BonusView {
                position: bonus.position,
                pulse: bonus.pulse.value(),
                remaining: bonus.remaining_fraction(self.clock),
            }),
            particles: self.particles.as_slice(),
            score: self.score,
            level: self.level,
            high_score: self.high_score,
            speed_ms: self.speed_ms,
            state: self.state,
            difficulty: self.difficulty,
            queued_difficulty: self.queued_difficulty,
            death_reason: self.death_reason,
            game_over_fade: self.game_over_fade,
        }
    }

    /// Moves the primary food to `position`, displacing a bonus food there.
    pub fn place_food(&mut self, position: Position) {
        if self.bonus.is_some_and(|bonus| bonus.position == position) {
            self.clear_bonus();
        }
        self.food = position;
    }

    /// Places a bonus food at `position` and schedules its expiry.
    pub fn place_bonus_food(&mut self, position: Position) {
        let lifetime = self.profile().bonus_duration;
        self.bonus = Some(BonusFood::new(position, self.clock, lifetime));
        self.timers
            .schedule(self.clock, lifetime, TimerKind::BonusExpiry);
        debug!(
            "bonus food at ({}, {}) for {} ms",
            position.x,
            position.y,
            lifetime.as_millis()
        );
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Current tick interval in milliseconds.
    #[must_use]
    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Returns true while the tick driver is active.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.driver.running
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    #[must_use]
    pub fn bonus_food(&self) -> Option<&BonusFood> {
        self.bonus.as_ref()
    }

    #[must_use]
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    fn profile(&self) -> &'static DifficultyProfile {
        self.difficulty.profile()
    }

    fn initialize(&mut self) {
        self.snake = Snake::starting(self.grid);
        self.score = 0;
        self.level = 1;
        self.speed_ms = self.profile().initial_speed_ms;
        self.bonus = None;
        self.particles.clear();
        self.death_reason = None;
        self.game_over_fade = 0.0;
        self.food = self.free_cell(None);
    }

    fn clock_is_running(&self) -> bool {
        matches!(
            self.state,
            SessionState::Running | SessionState::GameOver
        )
    }

    /// Picks a cell free of the snake and of `other_food`.
    fn free_cell(&mut self, other_food: Option<Position>) -> Position {
        let mut occupied: HashSet<Position> = self.snake.segments().copied().collect();
        occupied.extend(other_food);
        spawn_position(&mut self.rng, self.grid, &occupied)
    }

    /// Returns whether the level went up.
    fn eat_food(&mut self) -> bool {
        let previous_score = self.score;
        self.score += FOOD_POINTS;
        self.particles
            .emit(&mut self.rng, self.food, ParticleKind::Food, FOOD_PARTICLES);

        let bonus_position = self.bonus.map(|bonus| bonus.position);
        self.food = self.free_cell(bonus_position);

        let bonus_chance = self.profile().bonus_chance;
        if self.bonus.is_none() && self.rng.gen_bool(bonus_chance) {
            let position = self.free_cell(Some(self.food));
            self.place_bonus_food(position);
        }

        let leveled_up = self.apply_level_progress(previous_score);
        self.record_high_score();
        self.speed_up();
        leveled_up
    }

    fn eat_bonus(&mut self) -> bool {
        let Some(bonus) = self.bonus else {
            return false;
        };

        let previous_score = self.score;
        self.score += self.profile().bonus_points;
        self.particles.emit(
            &mut self.rng,
            bonus.position,
            ParticleKind::Bonus,
            BONUS_PARTICLES,
        );
        self.clear_bonus();

        let leveled_up = self.apply_level_progress(previous_score);
        self.record_high_score();
        leveled_up
    }

    fn clear_bonus(&mut self) {
        self.bonus = None;
        self.timers.cancel(TimerKind::BonusExpiry);
    }

    /// Adds one level per multiple of `POINTS_PER_LEVEL` crossed.
    fn apply_level_progress(&mut self, previous_score: u32) -> bool {
        let crossed = self.score / POINTS_PER_LEVEL - previous_score / POINTS_PER_LEVEL;
        if crossed == 0 {
            return false;
        }

        self.level += crossed;
        self.particles.emit(
            &mut self.rng,
            self.snake.head(),
            ParticleKind::LevelUp,
            LEVEL_UP_PARTICLES,
        );
        info!("level {} reached at score {}", self.level, self.score);
        true
    }

    fn record_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    fn speed_up(&mut self) {
        if self.speed_ms <= MIN_TICK_INTERVAL_MS {
            return;
        }

        self.speed_ms = self
            .speed_ms
            .saturating_sub(self.profile().speed_decrement_ms)
            .max(MIN_TICK_INTERVAL_MS);
        if self.driver.running {
            self.driver.start(self.tick_interval());
        }
    }

    fn game_over(&mut self, reason: DeathReason) {
        self.driver.stop();
        self.particles.emit(
            &mut self.rng,
            self.snake.head(),
            ParticleKind::Crash,
            CRASH_PARTICLES,
        );
        self.state = SessionState::GameOver;
        self.death_reason = Some(reason);
        self.game_over_fade = 0.0;
        self.timers
            .schedule(self.clock, GAME_OVER_FADE_STEP, TimerKind::GameOverFade);
        info!(
            "game over ({reason:?}) with score {} at level {}",
            self.score, self.level
        );
    }

    fn fire_due_timers(&mut self) {
        while let Some(kind) = self.timers.pop_due(self.clock) {
            match kind {
                TimerKind::BonusExpiry => {
                    if let Some(bonus) = self.bonus.take() {
                        debug!(
                            "bonus food at ({}, {}) expired",
                            bonus.position.x, bonus.position.y
                        );
                    }
                }
                TimerKind::GameOverFade => self.fade_step(),
            }
        }
    }

    fn fade_step(&mut self) {
        if self.state != SessionState::GameOver {
            return;
        }

        self.game_over_fade =
            (self.game_over_fade + GAME_OVER_FADE_INCREMENT).min(GAME_OVER_FADE_MAX);
        self.particles.advance();
        if self.game_over_fade < GAME_OVER_FADE_MAX {
            self.timers
                .schedule(self.clock, GAME_OVER_FADE_STEP, TimerKind::GameOverFade);
        }
    }
}
