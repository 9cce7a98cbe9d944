pub mod hud;
pub mod menu;

use ratatui::style::Color;

/// Linearly blends two colors; `t = 0` yields `from`, `t = 1` yields `to`.
///
/// Named ANSI colors are approximated by their common RGB values. Colors
/// without an RGB equivalent switch abruptly at `t = 1`.
#[must_use]
pub fn blend_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (color_to_rgb(from), color_to_rgb(to)) {
        (Some((fr, fg, fb)), Some((tr, tg, tb))) => {
            Color::Rgb(lerp_u8(fr, tr, t), lerp_u8(fg, tg, t), lerp_u8(fb, tb, t))
        }
        _ => {
            if t < 1.0 {
                from
            } else {
                to
            }
        }
    }
}

fn lerp_u8(from: u8, to: u8, t: f32) -> u8 {
    (f32::from(from) + (f32::from(to) - f32::from(from)) * t).round() as u8
}

fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Black => Some((0, 0, 0)),
        Color::Red => Some((205, 49, 49)),
        Color::Green => Some((13, 188, 121)),
        Color::Yellow => Some((229, 229, 16)),
        Color::Blue => Some((36, 114, 200)),
        Color::Magenta => Some((188, 63, 188)),
        Color::Cyan => Some((17, 168, 205)),
        Color::Gray => Some((229, 229, 229)),
        Color::DarkGray => Some((102, 102, 102)),
        Color::White => Some((255, 255, 255)),
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::blend_color;

    #[test]
    fn blend_hits_both_endpoints_and_midpoint() {
        let from = Color::Rgb(0, 100, 200);
        let to = Color::Rgb(100, 200, 0);

        assert_eq!(blend_color(from, to, 0.0), from);
        assert_eq!(blend_color(from, to, 1.0), to);
        assert_eq!(blend_color(from, to, 0.5), Color::Rgb(50, 150, 100));
    }

    #[test]
    fn blend_without_rgb_switches_at_the_end() {
        assert_eq!(blend_color(Color::Reset, Color::White, 0.9), Color::Reset);
        assert_eq!(blend_color(Color::Reset, Color::White, 1.0), Color::White);
    }
}
