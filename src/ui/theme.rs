use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for the pieces of a review printout
#[derive(Debug, Clone)]
pub struct Theme {
    /// Section titles (`Review #3 · Rust`)
    pub title: Style,
    /// Labels in front of values (`Model`, `Store`)
    pub label: Style,
    /// Model output
    pub feedback: Style,
    /// Degraded feedback and empty results
    pub degraded: Style,
    /// Confirmation lines
    pub done: Style,
    pub hint: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().magenta(),
            feedback: Style::new().bright_white(),
            degraded: Style::new().yellow().bold(),
            done: Style::new().green().bold(),
            hint: Style::new().white().dimmed(),
        }
    }

    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            title: none,
            label: none,
            feedback: none,
            degraded: none,
            done: none,
            hint: none,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
