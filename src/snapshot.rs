use crate::config::GridSize;
use crate::difficulty::Difficulty;
use crate::game::SessionState;
use crate::particles::Particle;
use crate::snake::{DeathReason, Position, Snake};

/// Render-facing view of the active bonus food.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusView {
    pub position: Position,
    /// Pulse phase in `0.0..=1.0`.
    pub pulse: f32,
    /// Fraction of the lifetime left in `0.0..=1.0`.
    pub remaining: f32,
}

/// Read-only projection of a session handed to the renderer once per frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: GridSize,
    pub snake: &'a Snake,
    pub food: Position,
    pub bonus: Option<BonusView>,
    pub particles: &'a [Particle],
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub speed_ms: u64,
    pub state: SessionState,
    pub difficulty: Difficulty,
    /// Difficulty that takes effect on the next reset.
    pub queued_difficulty: Option<Difficulty>,
    pub death_reason: Option<DeathReason>,
    /// Game-over overlay opacity, rising from 0 after a crash.
    pub game_over_fade: f32,
}
