//! Named foreground colors.

use std::fmt;
use std::str::FromStr;

use crossterm::style::{Color, Stylize};
use serde::Deserialize;

/// Foreground color accepted by prompts and config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    Black,
    Red,
    #[default]
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Tint {
    /// All tints, in ANSI order.
    pub const ALL: [Tint; 8] = [
        Tint::Black,
        Tint::Red,
        Tint::Green,
        Tint::Yellow,
        Tint::Blue,
        Tint::Magenta,
        Tint::Cyan,
        Tint::White,
    ];

    /// The crossterm color for the standard (non-bright) ANSI palette entry.
    pub fn color(self) -> Color {
        match self {
            Tint::Black => Color::Black,
            Tint::Red => Color::DarkRed,
            Tint::Green => Color::DarkGreen,
            Tint::Yellow => Color::DarkYellow,
            Tint::Blue => Color::DarkBlue,
            Tint::Magenta => Color::DarkMagenta,
            Tint::Cyan => Color::DarkCyan,
            Tint::White => Color::Grey,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tint::Black => "black",
            Tint::Red => "red",
            Tint::Green => "green",
            Tint::Yellow => "yellow",
            Tint::Blue => "blue",
            Tint::Magenta => "magenta",
            Tint::Cyan => "cyan",
            Tint::White => "white",
        }
    }
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Tint::ALL
            .into_iter()
            .find(|tint| tint.name() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown color '{}'. Available colors: black, red, green, yellow, blue, magenta, cyan, white",
                    s
                )
            })
    }
}

/// Render `text` in the given foreground color.
pub fn paint(text: impl fmt::Display, tint: Tint) -> String {
    text.to_string().with(tint.color()).to_string()
}
