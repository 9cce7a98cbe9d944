use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

use crate::difficulty::Difficulty;
use crate::error::ConfigError;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Builds a grid size, rejecting dimensions the game cannot be played on.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width < MIN_GRID_SIDE || height < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                width,
                height,
                min: MIN_GRID_SIDE,
            });
        }
        if width > MAX_GRID_SIDE || height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_SIDE,
            });
        }

        Ok(Self { width, height })
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Validated settings for one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub difficulty: Difficulty,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(
        width: u16,
        height: u16,
        difficulty: Difficulty,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            grid: GridSize::new(width, height)?,
            difficulty,
            seed,
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            difficulty: Difficulty::default(),
            seed: None,
        }
    }
}

/// Colors for every visual element the renderer draws.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    /// Alternate body color for the striped pattern.
    pub snake_body_alt: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub bonus_food: Color,
    /// Bonus food color at the dim end of its pulse.
    pub bonus_food_dim: Color,
    pub level_up: Color,
    pub crash: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Dark arcade theme.
pub const THEME_ARCADE: Theme = Theme {
    snake_head: Color::Rgb(138, 255, 203),
    snake_body: Color::Rgb(76, 175, 80),
    snake_body_alt: Color::Rgb(102, 210, 106),
    snake_tail: Color::Rgb(46, 125, 50),
    food: Color::Rgb(255, 87, 34),
    bonus_food: Color::Rgb(244, 67, 54),
    bonus_food_dim: Color::Rgb(255, 138, 128),
    level_up: Color::Rgb(255, 235, 59),
    crash: Color::Rgb(244, 67, 54),
    play_bg: Color::Rgb(18, 18, 30),
    border_fg: Color::Rgb(120, 120, 160),
    border_bg: Color::Reset,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Rgb(138, 255, 203),
    menu_footer: Color::DarkGray,
};

pub const BORDER_PLAY_AREA: border::Set = border::ROUNDED;

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";
pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";
pub const GLYPH_FOOD: &str = "●●";
pub const GLYPH_BONUS_FOOD: &str = "★★";
pub const GLYPH_PARTICLE_BRIGHT: &str = "•";
pub const GLYPH_PARTICLE_FADED: &str = "·";

/// Terminal columns used per grid cell so cells render roughly square.
pub const CELL_COLUMNS: u16 = 2;

/// Pixel size of one cell in particle space.
pub const CELL_PIXELS: f32 = 20.0;

pub const DEFAULT_GRID_WIDTH: u16 = 20;
pub const DEFAULT_GRID_HEIGHT: u16 = 20;
pub const MIN_GRID_SIDE: u16 = 10;
pub const MAX_GRID_SIDE: u16 = 100;

/// Fastest tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 40;

/// Points for primary food, independent of difficulty.
pub const FOOD_POINTS: u32 = 10;

/// Score needed per level.
pub const POINTS_PER_LEVEL: u32 = 50;

pub const FOOD_PARTICLES: usize = 15;
pub const BONUS_PARTICLES: usize = 25;
pub const LEVEL_UP_PARTICLES: usize = 30;
pub const CRASH_PARTICLES: usize = 40;

/// Cadence of the post-crash fade animation.
pub const GAME_OVER_FADE_STEP: Duration = Duration::from_millis(50);
pub const GAME_OVER_FADE_INCREMENT: f32 = 0.05;
pub const GAME_OVER_FADE_MAX: f32 = 0.8;

/// Frame pacing of the terminal loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Longest wall-clock gap a single frame may feed into the session.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);
