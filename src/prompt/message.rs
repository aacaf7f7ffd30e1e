//! Message-style prompts: yes/no, pause, and plain colored output.

use super::console::Console;
use super::{ExitSignal, PromptError, QUIT_TOKENS};
use crate::style::{paint, Indent, Separator, Tint};

const CONFIRM_PROMPT: &str = "Your Choice?[yn] (q-quit/b-back)?";
const PAUSE_PROMPT: &str = "Press Any Key to Continue...(q-quit)";
const PAUSE_DEFAULT: &str = ".";

/// Layout of a message block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStyle {
    pub indent: usize,
    /// Color of the separators (and of the message for pause prompts).
    pub color: Tint,
    pub separator: Separator,
}

impl MessageStyle {
    pub fn new(color: Tint) -> Self {
        Self {
            indent: 4,
            color,
            separator: Separator::none(),
        }
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn separator(mut self, separator: impl Into<Separator>) -> Self {
        self.separator = separator.into();
        self
    }

    fn margin(&self) -> Indent {
        Indent::quoted(self.indent, "  ", None)
    }

    fn show(&self, console: &mut dyn Console, msg: &str, msg_color: Tint) -> Result<(), PromptError> {
        let (header, footer) = self.separator.header_footer();
        if !header.is_empty() {
            console.puts(&paint(&header, self.color))?;
        }
        console.puts(&self.margin().apply(&paint(msg, msg_color)))?;
        if !footer.is_empty() {
            console.puts(&paint(&footer, self.color))?;
        }
        Ok(())
    }
}

/// Result of a pause prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paused {
    /// The raw input that dismissed the pause.
    Continue(String),
    /// The user asked to quit; the driver should terminate.
    Exit(ExitSignal),
}

/// Show `msg` and ask a yes/no question that defaults to yes.
pub fn yn_choice(
    console: &mut dyn Console,
    msg: &str,
    style: &MessageStyle,
) -> Result<bool, PromptError> {
    style.show(console, msg, Tint::Green)?;
    Ok(console.confirm(&paint(CONFIRM_PROMPT, Tint::Cyan), true)?)
}

/// Show `msg` and wait for any input. `q`/`Q` asks the driver to exit with a
/// non-zero status.
pub fn pause_choice(
    console: &mut dyn Console,
    msg: &str,
    style: &MessageStyle,
) -> Result<Paused, PromptError> {
    style.show(console, msg, style.color)?;
    let answer = console.read_line(&paint(PAUSE_PROMPT, Tint::Cyan), Some(PAUSE_DEFAULT))?;
    if QUIT_TOKENS.contains(&answer.as_str()) {
        return Ok(Paused::Exit(ExitSignal::failure()));
    }
    Ok(Paused::Continue(answer))
}

/// Print `msg` indented and colored.
pub fn color_print(
    console: &mut dyn Console,
    msg: &str,
    indent: usize,
    color: Tint,
) -> Result<(), PromptError> {
    let margin = Indent::quoted(indent, "  ", None);
    console.puts(&margin.apply(&paint(msg, color)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedConsole;

    #[test]
    fn test_yn_default_yes() {
        let mut console = ScriptedConsole::new([""]);
        let style = MessageStyle::new(Tint::Cyan);
        assert!(yn_choice(&mut console, "Continue?", &style).unwrap());
    }

    #[test]
    fn test_yn_no() {
        let mut console = ScriptedConsole::new(["n"]);
        let style = MessageStyle::new(Tint::Cyan);
        assert!(!yn_choice(&mut console, "Continue?", &style).unwrap());
    }

    #[test]
    fn test_yn_renders_separators_around_message() {
        let mut console = ScriptedConsole::new(["y"]);
        let style = MessageStyle::new(Tint::Cyan).separator(["---", "==="]);
        yn_choice(&mut console, "Deploy?", &style).unwrap();

        let out = console.output();
        assert_eq!(out.len(), 3);
        assert!(out[0].contains("---"));
        assert!(out[1].contains("Deploy?"));
        assert!(out[1].starts_with("    "));
        assert!(out[2].contains("==="));
    }

    #[test]
    fn test_pause_continue_returns_input() {
        let mut console = ScriptedConsole::new(["go"]);
        let style = MessageStyle::new(Tint::Green);
        assert_eq!(
            pause_choice(&mut console, "Done", &style).unwrap(),
            Paused::Continue("go".to_string())
        );
    }

    #[test]
    fn test_pause_enter_uses_dot() {
        let mut console = ScriptedConsole::new([""]);
        let style = MessageStyle::new(Tint::Green);
        assert_eq!(
            pause_choice(&mut console, "Done", &style).unwrap(),
            Paused::Continue(".".to_string())
        );
    }

    #[test]
    fn test_pause_quit_exits_non_zero() {
        let mut console = ScriptedConsole::new(["Q"]);
        let style = MessageStyle::new(Tint::Green);
        match pause_choice(&mut console, "Done", &style).unwrap() {
            Paused::Exit(signal) => assert_ne!(signal.code(), 0),
            other => panic!("expected exit, got {:?}", other),
        }
    }

    #[test]
    fn test_color_print_indents() {
        let mut console = ScriptedConsole::default();
        color_print(&mut console, "hi", 6, Tint::Yellow).unwrap();
        assert!(console.output()[0].starts_with("      "));
        assert!(console.output()[0].contains("hi"));
    }
}
