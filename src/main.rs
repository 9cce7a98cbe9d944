use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use arcade_snake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, FRAME_INTERVAL, GameConfig, THEME_ARCADE,
};
use arcade_snake::difficulty::Difficulty;
use arcade_snake::game::{GameSession, SessionState};
use arcade_snake::input::{GameInput, InputHandler};
use arcade_snake::renderer;
use arcade_snake::score::{HighScoreStore, data_dir};
use arcade_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use arcade_snake::ui::hud::HudInfo;
use clap::Parser;
use log::{LevelFilter, error, info, warn};
use simplelog::{Config, WriteLogger};

const LOG_FILE_NAME: &str = "arcade-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Difficulty profile for the first session: easy, medium or hard.
    #[arg(long, value_parser = str::parse::<Difficulty>, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Seed for food placement, bonus rolls and particles.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path (defaults to the platform data directory).
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// High score file path (defaults to the platform data directory).
    #[arg(long)]
    scores_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match GameConfig::new(cli.width, cli.height, cli.difficulty, cli.seed) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("arcade-snake: {error}");
            return ExitCode::FAILURE;
        }
    };

    let log_path = cli
        .log_file
        .unwrap_or_else(|| data_dir().join(LOG_FILE_NAME));
    if let Err(error) = init_logging(&log_path, cli.log_level) {
        eprintln!("Logging disabled, cannot open {}: {error}", log_path.display());
    }

    let store = cli
        .scores_file
        .map(HighScoreStore::at)
        .unwrap_or_default();
    let high_score = store.load().unwrap_or_else(|error| {
        eprintln!(
            "Ignoring unreadable high score file {}: {error}",
            store.path().display()
        );
        warn!("high score load failed: {error}");
        0
    });

    info!(
        "starting {}x{} grid on {} (high score {high_score})",
        config.grid.width, config.grid.height, config.difficulty
    );
    install_panic_hook();

    match run(config, &store, high_score) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("terminal failure: {error}");
            eprintln!("arcade-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: GameConfig, store: &HighScoreStore, mut saved_high_score: u32) -> io::Result<()> {
    let mut terminal = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut session = GameSession::new(config, saved_high_score);
    let mut session_start_high_score = saved_high_score;
    let mut last_frame = Instant::now();

    loop {
        let hud_info = HudInfo {
            theme: &THEME_ARCADE,
            session_start_high_score,
        };
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &session.snapshot(), &hud_info))?;

        if let Some(game_input) = input.poll_input(FRAME_INTERVAL)? {
            if game_input == GameInput::Quit {
                break;
            }

            handle_input(&mut session, game_input);
            if session.state() == SessionState::NotStarted {
                session_start_high_score = session.high_score();
            }
        }

        let now = Instant::now();
        session.update_frame(now.duration_since(last_frame));
        last_frame = now;

        if session.high_score() > saved_high_score {
            saved_high_score = session.high_score();
            if let Err(error) = store.save(saved_high_score) {
                warn!("failed to save high score: {error}");
            }
        }
    }

    info!("quit with high score {saved_high_score}");
    Ok(())
}

fn handle_input(session: &mut GameSession, input: GameInput) {
    match (input, session.state()) {
        (GameInput::Direction(direction), SessionState::Running)
        | (GameInput::Swipe(direction), SessionState::Running) => {
            session.set_pending_direction(direction);
        }
        (GameInput::Direction(_), SessionState::NotStarted | SessionState::Paused) => {
            session.start();
        }
        (GameInput::TogglePause, SessionState::Running) => {
            session.pause();
        }
        (
            GameInput::TogglePause | GameInput::Confirm,
            SessionState::NotStarted | SessionState::Paused,
        ) => {
            session.start();
        }
        (GameInput::TogglePause | GameInput::Confirm, SessionState::GameOver) => {
            session.reset();
            session.start();
        }
        (GameInput::Reset, state) => {
            session.reset();
            if state == SessionState::Running {
                session.start();
            }
        }
        (GameInput::SelectDifficulty(difficulty), _) => session.set_difficulty(difficulty),
        _ => {}
    }
}

fn init_logging(path: &Path, level: LevelFilter) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    WriteLogger::init(level, Config::default(), file).map_err(io::Error::other)
}
