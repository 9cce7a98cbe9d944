use thiserror::Error;

/// Configuration problems detected before a session is created.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    #[error("grid {width}x{height} is too small (minimum {min}x{min})")]
    GridTooSmall { width: u16, height: u16, min: u16 },
    #[error("grid {width}x{height} is too large (maximum {max}x{max})")]
    GridTooLarge { width: u16, height: u16, max: u16 },
}
