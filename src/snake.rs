use std::collections::{VecDeque, vec_deque};

use crate::config::GridSize;
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
            Direction::Right => Self::new(self.x + 1, self.y),
        }
    }
}

/// Why a move ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Number of segments in a freshly spawned snake.
pub const STARTING_LENGTH: i32 = 3;

/// Column of the head at spawn.
const STARTING_HEAD_X: i32 = 6;

/// Snake body plus the current and latched movement directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates the standard three-segment snake facing right on the middle row.
    #[must_use]
    pub fn starting(bounds: GridSize) -> Self {
        let y = i32::from(bounds.height / 2);
        let segments = (0..STARTING_LENGTH)
            .map(|offset| Position::new(STARTING_HEAD_X - offset, y))
            .collect();

        Self::from_segments(segments, Direction::Right)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Callers must pass at least one segment.
    #[must_use]
    pub(crate) fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        }
    }

    /// Latches a direction for the next tick.
    ///
    /// Direct reversals of the current direction are dropped silently; the
    /// return value reports whether the request was accepted.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.pending_direction = direction;
        true
    }

    /// Makes the latched direction current and returns the candidate head.
    pub fn commit_direction(&mut self) -> Position {
        self.direction = self.pending_direction;
        self.head().step(self.direction)
    }

    /// Classifies a candidate head against the walls and the body.
    ///
    /// The current tail is excluded because it moves away on the same tick.
    #[must_use]
    pub fn collision_at(&self, candidate: Position, bounds: GridSize) -> Option<DeathReason> {
        if !candidate.is_within_bounds(bounds) {
            return Some(DeathReason::WallCollision);
        }

        let vacated = self.body.len().saturating_sub(1);
        if self.body.iter().take(vacated).any(|segment| *segment == candidate) {
            return Some(DeathReason::SelfCollision);
        }

        None
    }

    /// Moves the head to `head`, keeping the tail when `grow` is set.
    pub fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    #[must_use]
    pub fn tail(&self) -> Option<Position> {
        self.body.back().copied()
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> vec_deque::Iter<'_, Position> {
        self.body.iter()
    }
}
