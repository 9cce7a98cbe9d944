//! Scheduled events that fire on the session clock.
//!
//! Every entry carries the generation it was scheduled in. Bumping the
//! generation on a state-clearing transition makes any entry from an older
//! session inert, even if it is still queued.

use std::time::Duration;

/// Events the session schedules for itself.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimerKind {
    BonusExpiry,
    GameOverFade,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: Duration,
    generation: u64,
    kind: TimerKind,
}

/// Queue of pending events ordered by due time on fire.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: Vec<Scheduled>,
    generation: u64,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind` to fire `delay` after `now`, replacing any pending
    /// event of the same kind.
    pub fn schedule(&mut self, now: Duration, delay: Duration, kind: TimerKind) {
        self.cancel(kind);
        self.pending.push(Scheduled {
            due: now + delay,
            generation: self.generation,
            kind,
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|scheduled| scheduled.kind != kind);
    }

    /// Drops every pending event and starts a new generation.
    pub fn invalidate_all(&mut self) {
        self.generation += 1;
        self.pending.clear();
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Earliest due time among live events.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.live().map(|scheduled| scheduled.due).min()
    }

    /// Removes and returns the earliest live event due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerKind> {
        let generation = self.generation;
        self.pending
            .retain(|scheduled| scheduled.generation == generation);

        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, scheduled)| scheduled.due <= now)
            .min_by_key(|(_, scheduled)| scheduled.due)
            .map(|(index, _)| index)?;

        Some(self.pending.swap_remove(index).kind)
    }

    #[must_use]
    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.live().any(|scheduled| scheduled.kind == kind)
    }

    fn live(&self) -> impl Iterator<Item = &Scheduled> {
        self.pending
            .iter()
            .filter(move |scheduled| scheduled.generation == self.generation)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{TimerKind, Timers};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn events_fire_in_due_order() {
        let mut timers = Timers::new();
        timers.schedule(ms(0), ms(300), TimerKind::BonusExpiry);
        timers.schedule(ms(0), ms(100), TimerKind::GameOverFade);

        assert_eq!(timers.next_due(), Some(ms(100)));
        assert_eq!(timers.pop_due(ms(50)), None);
        assert_eq!(timers.pop_due(ms(400)), Some(TimerKind::GameOverFade));
        assert_eq!(timers.pop_due(ms(400)), Some(TimerKind::BonusExpiry));
        assert_eq!(timers.pop_due(ms(400)), None);
    }

    #[test]
    fn rescheduling_replaces_the_pending_event() {
        let mut timers = Timers::new();
        timers.schedule(ms(0), ms(100), TimerKind::BonusExpiry);
        timers.schedule(ms(50), ms(100), TimerKind::BonusExpiry);

        assert_eq!(timers.pop_due(ms(120)), None);
        assert_eq!(timers.pop_due(ms(150)), Some(TimerKind::BonusExpiry));
    }

    #[test]
    fn invalidated_events_never_fire() {
        let mut timers = Timers::new();
        timers.schedule(ms(0), ms(10), TimerKind::BonusExpiry);

        timers.invalidate_all();

        assert_eq!(timers.generation(), 1);
        assert!(!timers.is_scheduled(TimerKind::BonusExpiry));
        assert_eq!(timers.pop_due(ms(1_000)), None);
    }

    #[test]
    fn cancel_removes_only_that_kind() {
        let mut timers = Timers::new();
        timers.schedule(ms(0), ms(10), TimerKind::BonusExpiry);
        timers.schedule(ms(0), ms(10), TimerKind::GameOverFade);

        timers.cancel(TimerKind::BonusExpiry);

        assert!(timers.is_scheduled(TimerKind::GameOverFade));
        assert!(!timers.is_scheduled(TimerKind::BonusExpiry));
    }
}
