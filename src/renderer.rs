use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_PLAY_AREA, CELL_COLUMNS, CELL_PIXELS, GLYPH_BONUS_FOOD, GLYPH_FOOD,
    GLYPH_PARTICLE_BRIGHT, GLYPH_PARTICLE_FADED, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL,
    GridSize, Theme,
};
use crate::game::SessionState;
use crate::input::Direction;
use crate::particles::{Particle, ParticleKind};
use crate::snake::Position;
use crate::snapshot::{BonusView, Snapshot};
use crate::ui::blend_color;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{
    GameOverSummary, render_game_over_menu, render_pause_menu, render_start_menu,
};

/// Particles dimmer than this are drawn with the faded glyph.
const PARTICLE_FADED_BELOW: f32 = 0.5;

/// Renders the full frame from a session snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>, hud_info: &HudInfo<'_>) {
    let theme = hud_info.theme;
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, hud_info);

    let block = Block::bordered()
        .border_set(BORDER_PLAY_AREA)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_particles(frame, inner, snapshot, theme);
    render_food(frame, inner, snapshot, theme);
    if let Some(bonus) = snapshot.bonus {
        render_bonus_food(frame, inner, snapshot.grid, bonus, theme);
    }
    render_snake(frame, inner, snapshot, theme);

    match snapshot.state {
        SessionState::NotStarted => render_start_menu(
            frame,
            play_area,
            snapshot.high_score,
            snapshot.difficulty,
            theme,
        ),
        SessionState::Paused => render_pause_menu(frame, play_area, theme),
        SessionState::GameOver => render_game_over_menu(
            frame,
            play_area,
            GameOverSummary {
                score: snapshot.score,
                level: snapshot.level,
                previous_high_score: hud_info.session_start_high_score,
                death_reason: snapshot.death_reason,
                fade: snapshot.game_over_fade,
            },
            theme,
        ),
        SessionState::Running => {}
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, snapshot.food) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(theme.food).bg(theme.play_bg),
    );
}

fn render_bonus_food(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: GridSize,
    bonus: BonusView,
    theme: &Theme,
) {
    let Some((x, y)) = logical_to_terminal(inner, grid, bonus.position) else {
        return;
    };

    let color = blend_color(theme.bonus_food_dim, theme.bonus_food, bonus.pulse);
    let mut style = Style::new().fg(color).bg(theme.play_bg);
    if bonus.pulse > 0.5 {
        style = style.add_modifier(Modifier::BOLD);
    }

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_BONUS_FOOD, style);
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let snake = snapshot.snake;
    let last_index = snake.len().saturating_sub(1);

    let buffer = frame.buffer_mut();
    // Tail first so the head wins any overlap drawn during a crash frame.
    for (index, segment) in snake.segments().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, *segment) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (
                head_glyph(snake.direction()),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            )
        } else if index == last_index {
            (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail))
        } else if index % 2 == 0 {
            (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body_alt))
        };

        buffer.set_string(x, y, glyph, style.bg(theme.play_bg));
    }
}

fn render_particles(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for particle in snapshot.particles {
        let Some(cell) = particle.cell() else {
            continue;
        };
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, cell) else {
            continue;
        };

        let color = blend_color(
            theme.play_bg,
            particle_color(particle.kind, theme),
            particle.opacity,
        );
        buffer.set_string(
            x + sub_cell_column(particle),
            y,
            particle_glyph(particle),
            Style::new().fg(color).bg(theme.play_bg),
        );
    }
}

fn particle_color(kind: ParticleKind, theme: &Theme) -> Color {
    match kind {
        ParticleKind::Food => theme.food,
        ParticleKind::Bonus => theme.bonus_food,
        ParticleKind::LevelUp => theme.level_up,
        ParticleKind::Crash => theme.crash,
    }
}

fn particle_glyph(particle: &Particle) -> &'static str {
    if particle.opacity < PARTICLE_FADED_BELOW {
        GLYPH_PARTICLE_FADED
    } else {
        GLYPH_PARTICLE_BRIGHT
    }
}

/// Which of the cell's terminal columns the particle falls in.
fn sub_cell_column(particle: &Particle) -> u16 {
    if particle.x.rem_euclid(CELL_PIXELS) < CELL_PIXELS / 2.0 {
        0
    } else {
        CELL_COLUMNS - 1
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Maps a grid cell to the terminal cell of its left column.
fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(grid) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::{logical_to_terminal, render};
    use crate::config::{GameConfig, GridSize, THEME_ARCADE};
    use crate::game::GameSession;
    use crate::snake::Position;
    use crate::ui::hud::HudInfo;

    #[test]
    fn cells_map_to_two_terminal_columns() {
        let inner = Rect::new(1, 1, 40, 20);
        let grid = GridSize {
            width: 20,
            height: 20,
        };

        assert_eq!(logical_to_terminal(inner, grid, Position::new(0, 0)), Some((1, 1)));
        assert_eq!(logical_to_terminal(inner, grid, Position::new(3, 2)), Some((7, 3)));
        assert_eq!(logical_to_terminal(inner, grid, Position::new(20, 0)), None);
    }

    #[test]
    fn cells_outside_a_small_viewport_are_skipped() {
        let inner = Rect::new(0, 0, 10, 5);
        let grid = GridSize {
            width: 20,
            height: 20,
        };

        assert_eq!(logical_to_terminal(inner, grid, Position::new(4, 4)), Some((8, 4)));
        assert_eq!(logical_to_terminal(inner, grid, Position::new(5, 0)), None);
        assert_eq!(logical_to_terminal(inner, grid, Position::new(0, 5)), None);
    }

    #[test]
    fn full_frame_renders_without_panicking() {
        let mut game = GameSession::new(
            GameConfig {
                seed: Some(5),
                ..GameConfig::default()
            },
            0,
        );
        let mut terminal =
            Terminal::new(TestBackend::new(44, 26)).expect("test backend should build");
        let info = HudInfo {
            theme: &THEME_ARCADE,
            session_start_high_score: 0,
        };

        for _ in 0..3 {
            terminal
                .draw(|frame| render(frame, &game.snapshot(), &info))
                .expect("draw should succeed");
            game.start();
            game.tick();
        }
    }
}
