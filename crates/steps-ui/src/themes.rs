use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Read the terminal background from `COLORFGBG` (`"fg;bg"`).
///
/// Background codes 0–6 and 8 are dark, the remaining ANSI codes light. A
/// missing or unparseable variable is treated as dark.
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    let bg = value
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(code) if code <= 6 || code == 8 => BackgroundType::Dark,
        Some(_) => BackgroundType::Light,
        None => BackgroundType::Dark,
    }
}

/// Colour set for the four step charts.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Frame ────────────────────────────────────────────────────────────────
    pub title: Style,
    pub border: Style,
    pub axis: Style,
    pub text: Style,
    pub dim: Style,
    pub warning: Style,

    // ── Trend chart ──────────────────────────────────────────────────────────
    pub daily_line: Style,
    pub rolling_line: Style,

    // ── Distribution chart ───────────────────────────────────────────────────
    pub histogram_bar: Style,
    pub density_line: Style,

    // ── Monthly change chart ─────────────────────────────────────────────────
    /// Month with more steps than the one before.
    pub increase: Style,
    /// Month with the same or fewer steps.
    pub decrease: Style,

    // ── Regression chart ─────────────────────────────────────────────────────
    pub scatter_point: Style,
    pub fit_line: Style,
}

impl Theme {
    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::Gray),
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            warning: Style::default().fg(Color::Yellow),

            daily_line: Style::default().fg(Color::LightBlue),
            rolling_line: Style::default().fg(Color::Red),

            histogram_bar: Style::default().fg(Color::Blue),
            density_line: Style::default().fg(Color::LightCyan),

            increase: Style::default().fg(Color::Green),
            decrease: Style::default().fg(Color::Red),

            scatter_point: Style::default().fg(Color::LightBlue),
            fit_line: Style::default().fg(Color::Red),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Darker line colours keep the plots legible on a white canvas.
    pub fn light() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Gray),
            axis: Style::default().fg(Color::DarkGray),
            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            warning: Style::default().fg(Color::Rgb(204, 122, 0)),

            daily_line: Style::default().fg(Color::Blue),
            rolling_line: Style::default().fg(Color::Red),

            histogram_bar: Style::default().fg(Color::Blue),
            density_line: Style::default().fg(Color::Magenta),

            increase: Style::default().fg(Color::Green),
            decrease: Style::default().fg(Color::Red),

            scatter_point: Style::default().fg(Color::Blue),
            fit_line: Style::default().fg(Color::Red),
        }
    }

    /// Basic 8-colour ANSI palette without modifiers, for minimal terminals.
    pub fn classic() -> Self {
        Self {
            title: Style::default().fg(Color::White),
            border: Style::default().fg(Color::White),
            axis: Style::default().fg(Color::White),
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::White),
            warning: Style::default().fg(Color::Yellow),

            daily_line: Style::default().fg(Color::Blue),
            rolling_line: Style::default().fg(Color::Red),

            histogram_bar: Style::default().fg(Color::Blue),
            density_line: Style::default().fg(Color::Cyan),

            increase: Style::default().fg(Color::Green),
            decrease: Style::default().fg(Color::Red),

            scatter_point: Style::default().fg(Color::Blue),
            fit_line: Style::default().fg(Color::Red),
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.title.fg, Some(Color::Cyan));
        assert_eq!(t.rolling_line.fg, Some(Color::Red));
        assert_eq!(t.increase.fg, Some(Color::Green));
        assert_eq!(t.decrease.fg, Some(Color::Red));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.title.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_modifiers() {
        let t = Theme::classic();
        assert!(!t.title.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("light").text.fg, Some(Color::Black));
        assert_eq!(Theme::from_name("dark").text.fg, Some(Color::White));
        assert_eq!(Theme::from_name("classic").title.fg, Some(Color::White));
    }

    #[test]
    fn test_background_from_colorfgbg() {
        assert_eq!(background_from_colorfgbg(Some("15;0")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg(Some("0;default;7")), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg(Some("garbage")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(None), BackgroundType::Dark);
    }
}
