//! Interactive prompts: numbered menus, yes/no questions and pauses.
//!
//! Prompts never terminate the process themselves. When the user quits and
//! the prompt is configured to leave the application, an [`ExitSignal`] is
//! returned and the top-level driver decides how to exit.

mod console;
mod menu;
mod message;

pub use console::{parse_confirm, Console, ScriptedConsole, TerminalConsole};
pub use menu::{
    Align, Icons, MenuStyle, NumChoice, SerialFormat, ValidKeys, ACCEPT_ANY, DEFAULT_ICONS,
};
pub use message::{color_print, pause_choice, yn_choice, MessageStyle, Paused};

use crate::image::ImageError;

/// Answers that quit a prompt.
pub const QUIT_TOKENS: [&str; 2] = ["q", "Q"];

/// Answers that go back one menu level.
pub const BACK_TOKENS: [&str; 2] = ["b", "B"];

/// Outcome of a numbered menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 0-based index of the chosen item.
    Index(usize),
    /// The back token as typed.
    Back(String),
    /// The quit token as typed, when the menu does not exit the application.
    Quit(String),
    /// An allow-listed token, or any answer when every answer is accepted.
    Key(String),
    /// The user quit and the application should exit.
    Exit(ExitSignal),
}

/// Request to terminate the process with a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitSignal {
    code: i32,
}

impl ExitSignal {
    /// Quitting from a menu.
    pub fn success() -> Self {
        Self { code: 0 }
    }

    /// Quitting from a pause prompt.
    pub fn failure() -> Self {
        Self { code: -1 }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// Exit immediately. Destructors of live values do not run.
    pub fn terminate(self) -> ! {
        log::debug!("Exiting with status {}", self.code);
        std::process::exit(self.code)
    }
}

/// Errors that can interrupt a prompt.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render image: {0}")]
    Image(#[from] ImageError),
}
