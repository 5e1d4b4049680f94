use std::sync::OnceLock;

use ratatui::style::Color;

static DEFAULTS: OnceLock<Theme> = OnceLock::new();

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub state_foreground: Color,
    pub state_background: Color,
    pub current_foreground: Color,
    pub current_background: Color,
    pub separator: String,
}

impl Theme {
    pub fn builtin() -> Self {
        Self {
            background: Color::Reset,
            state_foreground: Color::White,
            state_background: Color::DarkGray,
            current_foreground: Color::Black,
            current_background: Color::Blue,
            separator: "❯".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        defaults()
    }
}

/// Registers the process wide default theme. Only the first call wins, later
/// calls return `false` and leave the installed theme untouched.
pub fn install_defaults(theme: Theme) -> bool {
    let installed = DEFAULTS.set(theme).is_ok();
    if !installed {
        tracing::debug!("default theme already installed");
    }

    installed
}

pub fn defaults() -> Theme {
    match DEFAULTS.get() {
        Some(theme) => theme.clone(),
        None => Theme::builtin(),
    }
}
