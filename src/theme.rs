//! Light/dark theme with a persisted preference. Sits on the same
//! key-value boundary as the history log.

use crate::history::{KvStore, THEME_KEY};
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Colors used by the view widgets for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub dim: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub accent: Color,
    pub hint: Color,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                fg: Color::White,
                dim: Color::DarkGray,
                correct: Color::Green,
                incorrect: Color::Red,
                accent: Color::Magenta,
                hint: Color::Yellow,
            },
            Theme::Light => Palette {
                fg: Color::Black,
                dim: Color::Gray,
                correct: Color::Green,
                incorrect: Color::Red,
                accent: Color::Blue,
                hint: Color::Yellow,
            },
        }
    }

    /// Loads the persisted preference, defaulting to dark on anything
    /// missing or unrecognized.
    pub fn load<S: KvStore>(store: &S) -> Self {
        store
            .get(THEME_KEY)
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or_default()
    }

    pub fn save<S: KvStore>(self, store: &S) -> std::io::Result<()> {
        store.put(THEME_KEY, self.as_str())
    }
}
