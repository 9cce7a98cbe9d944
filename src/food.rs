use std::collections::HashSet;
use std::time::Duration;

use rand::Rng;

use crate::config::GridSize;
use crate::snake::Position;

/// Pulse phase change per tick.
const PULSE_STEP: f32 = 0.05;

/// Cosmetic pulse that bounces between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    value: f32,
    step: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            value: 0.0,
            step: PULSE_STEP,
        }
    }
}

impl Pulse {
    /// Moves the phase one step, reversing once an end is reached.
    pub fn advance(&mut self) {
        self.value += self.step;
        if self.value >= 1.0 || self.value <= 0.0 {
            self.step = -self.step;
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.value.clamp(0.0, 1.0)
    }
}

/// Time-limited, higher-value food.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonusFood {
    pub position: Position,
    /// Session-clock instant at which the bonus disappears.
    pub deadline: Duration,
    pub lifetime: Duration,
    pub pulse: Pulse,
}

impl BonusFood {
    #[must_use]
    pub fn new(position: Position, now: Duration, lifetime: Duration) -> Self {
        Self {
            position,
            deadline: now + lifetime,
            lifetime,
            pulse: Pulse::default(),
        }
    }

    /// Fraction of the lifetime still left at `now`, in `0.0..=1.0`.
    #[must_use]
    pub fn remaining_fraction(&self, now: Duration) -> f32 {
        if self.lifetime.is_zero() {
            return 0.0;
        }

        let remaining = self.deadline.saturating_sub(now);
        (remaining.as_secs_f32() / self.lifetime.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Samples grid cells uniformly until one outside `occupied` turns up.
///
/// Never returns on a fully occupied grid.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Position>,
) -> Position {
    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !occupied.contains(&candidate) {
            return candidate;
        }
    }
}
