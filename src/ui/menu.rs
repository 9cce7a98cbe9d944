use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{GAME_OVER_FADE_MAX, Theme};
use crate::difficulty::Difficulty;
use crate::snake::DeathReason;
use crate::ui::blend_color;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    high_score: u32,
    difficulty: Difficulty,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from(format!("High score: {high_score}")),
        Line::from(format!("Difficulty: {difficulty}")),
        Line::from(""),
        Line::from("[Enter]/[Space]/arrows Start"),
        Line::from("[1] easy  [2] medium  [3] hard"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("Arrows/WASD or drag the mouse to steer"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(Style::default().fg(theme.menu_title)),
        Line::from(""),
        Line::from("[Space]/[P] Resume"),
        Line::from("[R] Restart  [1-3] Difficulty"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Summary shown once the snake has crashed.
#[derive(Debug, Clone, Copy)]
pub struct GameOverSummary {
    pub score: u32,
    pub level: u32,
    /// High score before this session started.
    pub previous_high_score: u32,
    pub death_reason: Option<DeathReason>,
    /// Overlay opacity from the session, `0.0..=GAME_OVER_FADE_MAX`.
    pub fade: f32,
}

/// Draws the game-over screen, fading its text in with the session fade.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    summary: GameOverSummary,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let progress = summary.fade / GAME_OVER_FADE_MAX;
    let text_style = Style::default().fg(blend_color(theme.play_bg, theme.hud_value, progress));
    let title_style = Style::default()
        .fg(blend_color(theme.play_bg, theme.crash, progress))
        .add_modifier(Modifier::BOLD);

    let is_new_high = summary.score > summary.previous_high_score;
    let lines = vec![
        Line::from("GAME OVER!").style(title_style),
        Line::from(""),
        Line::from(format!("Score: {}", summary.score)),
        Line::from(format!("Level: {}", summary.level)),
        Line::from(match summary.death_reason {
            Some(DeathReason::WallCollision) => "Cause: hit wall",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Enter] Play Again"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(text_style)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
