use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::difficulty::Difficulty;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    /// Keyboard direction.
    Direction(Direction),
    /// Direction derived from a pointer drag.
    Swipe(Direction),
    TogglePause,
    Confirm,
    Reset,
    SelectDifficulty(Difficulty),
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Terminal rows are roughly twice as tall as columns.
const SWIPE_ROW_WEIGHT: i32 = 2;

/// Turns successive pointer samples into directions by dominant axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    anchor: Option<(i32, i32)>,
}

impl SwipeTracker {
    /// Records the pointer-down position.
    pub fn begin(&mut self, column: u16, row: u16) {
        self.anchor = Some((i32::from(column), i32::from(row)));
    }

    /// Compares the displacement since the last sample and re-anchors.
    ///
    /// Returns `None` without an anchor or when the pointer has not moved.
    pub fn sample(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (column, row) = (i32::from(column), i32::from(row));
        let (start_column, start_row) = self.anchor.replace((column, row))?;

        let dx = column - start_column;
        let dy = (row - start_row) * SWIPE_ROW_WEIGHT;
        if dx == 0 && dy == 0 {
            return None;
        }

        if dx.abs() > dy.abs() {
            Some(if dx > 0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }
}

/// Polls crossterm for keyboard and mouse events.
#[derive(Debug, Default)]
pub struct InputHandler {
    swipe: SwipeTracker,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits up to `timeout` for one event and maps it to a game input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.map_mouse(mouse),
            _ => None,
        })
    }

    fn map_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.begin(mouse.column, mouse.row);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => self
                .swipe
                .sample(mouse.column, mouse.row)
                .map(GameInput::Swipe),
            MouseEventKind::Up(MouseButton::Left) => {
                self.swipe.end();
                None
            }
            _ => None,
        }
    }
}

/// Maps one key event to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Char(' ' | 'p' | 'P') => GameInput::TogglePause,
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Char('r' | 'R') => GameInput::Reset,
        KeyCode::Char('1') => GameInput::SelectDifficulty(Difficulty::Easy),
        KeyCode::Char('2') => GameInput::SelectDifficulty(Difficulty::Medium),
        KeyCode::Char('3') => GameInput::SelectDifficulty(Difficulty::Hard),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}
