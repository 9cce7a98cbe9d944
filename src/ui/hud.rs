use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::snapshot::Snapshot;

const SEPARATOR: &str = " │ ";
const BONUS_BAR_WIDTH: usize = 10;

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    /// High score at the moment the current session started.
    pub session_start_high_score: u32,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot<'_>,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, score_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(snapshot, info, usize::from(score_area.width)))
            .alignment(Alignment::Right),
        score_area,
    );
    frame.render_widget(
        Paragraph::new(status_line(snapshot, info.theme)).alignment(Alignment::Right),
        status_area,
    );

    play_area
}

fn score_line(
    snapshot: &Snapshot<'_>,
    info: &HudInfo<'_>,
    available_width: usize,
) -> Line<'static> {
    let theme = info.theme;
    let compact = score_line_width(snapshot, false) > available_width;
    let label = |full: &'static str, short: &'static str| if compact { short } else { full };

    let high_score_style = if snapshot.high_score > info.session_start_high_score {
        Style::default()
            .fg(theme.level_up)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.hud_value)
    };
    let label_style = Style::default().fg(theme.hud_label);
    let value_style = Style::default().fg(theme.hud_value);

    Line::from(vec![
        Span::styled(format!("{}: ", label("Length", "L")), label_style),
        Span::styled(snapshot.snake.len().to_string(), value_style),
        Span::styled(SEPARATOR, label_style),
        Span::styled(format!("{}: ", label("Level", "V")), label_style),
        Span::styled(snapshot.level.to_string(), value_style),
        Span::styled(SEPARATOR, label_style),
        Span::styled(format!("{}: ", label("Score", "S")), label_style),
        Span::styled(snapshot.score.to_string(), value_style),
        Span::styled(SEPARATOR, label_style),
        Span::styled(format!("{}: ", label("Hi", "H")), label_style),
        Span::styled(snapshot.high_score.to_string(), high_score_style),
    ])
}

fn score_line_width(snapshot: &Snapshot<'_>, compact: bool) -> usize {
    let labels: [&str; 4] = if compact {
        ["L", "V", "S", "H"]
    } else {
        ["Length", "Level", "Score", "Hi"]
    };
    let values = [
        snapshot.snake.len().to_string(),
        snapshot.level.to_string(),
        snapshot.score.to_string(),
        snapshot.high_score.to_string(),
    ];

    labels
        .iter()
        .zip(&values)
        .map(|(label, value)| label.width() + 2 + value.width())
        .sum::<usize>()
        + SEPARATOR.width() * (labels.len() - 1)
}

fn status_line(snapshot: &Snapshot<'_>, theme: &Theme) -> Line<'static> {
    let label_style = Style::default().fg(theme.hud_label);
    let value_style = Style::default().fg(theme.hud_value);

    let difficulty = match snapshot.queued_difficulty {
        Some(next) => format!("{} → {next}", snapshot.difficulty),
        None => snapshot.difficulty.to_string(),
    };

    let mut spans = Vec::new();
    if let Some(bonus) = snapshot.bonus {
        spans.push(Span::styled("Bonus ", Style::default().fg(theme.bonus_food)));
        spans.push(Span::styled(
            bonus_bar(bonus.remaining),
            Style::default().fg(theme.bonus_food),
        ));
        spans.push(Span::styled(SEPARATOR, label_style));
    }

    spans.extend([
        Span::styled(difficulty, value_style),
        Span::styled(SEPARATOR, label_style),
        Span::styled(format!("{} ms", snapshot.speed_ms), value_style),
    ]);

    Line::from(spans)
}

/// Countdown bar for the bonus food lifetime.
fn bonus_bar(remaining: f32) -> String {
    let filled = (remaining.clamp(0.0, 1.0) * BONUS_BAR_WIDTH as f32).ceil() as usize;
    format!(
        "{}{}",
        "▰".repeat(filled),
        "▱".repeat(BONUS_BAR_WIDTH - filled)
    )
}
