//! Arcade Snake: a fixed-timestep snake session with bonus food, levels and
//! cosmetic particles, plus a ratatui front-end that renders its snapshots.

pub mod config;
pub mod difficulty;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod particles;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod timers;
pub mod ui;
