//! Console collaborators: where prompts print and read.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::util::to_text;

/// Line-oriented terminal I/O used by the prompts.
pub trait Console {
    /// Print one line.
    fn puts(&mut self, line: &str) -> io::Result<()>;

    /// Ask for a line of text. Empty input yields `default` when one is given;
    /// without a default the question is repeated.
    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String>;

    /// Ask a yes/no question. Empty input yields `default`.
    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool>;

    /// Clear previously printed output.
    fn clear(&mut self) -> io::Result<()>;
}

const INVALID_CONFIRM: &str = "Error: invalid input";

/// Interpret a yes/no answer the way the interactive prompt does.
pub fn parse_confirm(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")
}

/// Console over a reader/writer pair, normally stdin/stdout.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
}

impl TerminalConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // Undecodable bytes become U+FFFD so the caller can reject the line.
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(eof());
        }
        Ok(to_text(&buf).trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn puts(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        let question = match default {
            Some(d) => format!("{} [{}]: ", prompt, d),
            None => format!("{}: ", prompt),
        };
        loop {
            let answer = self.ask(&question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            if let Some(d) = default {
                return Ok(d.to_string());
            }
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool> {
        let question = format!("{} [{}]: ", prompt, if default { "Y/n" } else { "y/N" });
        loop {
            let answer = self.ask(&question)?;
            match parse_confirm(&answer, default) {
                Some(value) => return Ok(value),
                None => self.puts(INVALID_CONFIRM)?,
            }
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))
    }
}

/// Console fed from a queue of answers, recording everything printed.
///
/// Running out of answers is reported as `UnexpectedEof`, like a closed stdin.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    output: Vec<String>,
    prompts: Vec<String>,
    clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Lines printed so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Questions asked so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Number of times the screen was cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(eof)
    }
}

impl Console for ScriptedConsole {
    fn puts(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        loop {
            let answer = self.next_answer(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            if let Some(d) = default {
                return Ok(d.to_string());
            }
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> io::Result<bool> {
        loop {
            let answer = self.next_answer(prompt)?;
            match parse_confirm(&answer, default) {
                Some(value) => return Ok(value),
                None => self.puts(INVALID_CONFIRM)?,
            }
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_confirm() {
        assert_eq!(parse_confirm("", true), Some(true));
        assert_eq!(parse_confirm("", false), Some(false));
        assert_eq!(parse_confirm("Y", false), Some(true));
        assert_eq!(parse_confirm("no", true), Some(false));
        assert_eq!(parse_confirm("maybe", true), None);
    }

    #[test]
    fn test_terminal_read_line_uses_default_on_empty() {
        let mut console = TerminalConsole::new(Cursor::new("\n"), Vec::new());
        let answer = console.read_line("Pick", Some("1")).unwrap();
        assert_eq!(answer, "1");

        let (_, out) = console.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "Pick [1]: ");
    }

    #[test]
    fn test_terminal_read_line_strips_newline() {
        let mut console = TerminalConsole::new(Cursor::new("2\r\n"), Vec::new());
        assert_eq!(console.read_line("Pick", Some("1")).unwrap(), "2");
    }

    #[test]
    fn test_terminal_read_line_repeats_without_default() {
        let mut console = TerminalConsole::new(Cursor::new("\nabc\n"), Vec::new());
        assert_eq!(console.read_line("Name", None).unwrap(), "abc");
    }

    #[test]
    fn test_terminal_read_line_accepts_invalid_utf8() {
        let mut console = TerminalConsole::new(Cursor::new(b"\xff\xfe\n2\n".to_vec()), Vec::new());
        assert_eq!(console.read_line("Pick", None).unwrap(), "\u{fffd}\u{fffd}");
        assert_eq!(console.read_line("Pick", None).unwrap(), "2");
    }

    #[test]
    fn test_menu_reprompts_after_invalid_utf8() {
        use crate::prompt::{NumChoice, Selection};

        let mut console = TerminalConsole::new(Cursor::new(b"\xff\xfe\n2\n".to_vec()), Vec::new());
        let selection = NumChoice::new(&["apple", "banana"]).ask(&mut console).unwrap();
        assert_eq!(selection, Some(Selection::Index(1)));

        let (_, out) = console.into_inner();
        assert!(String::from_utf8(out).unwrap().contains("Invalid input[\u{fffd}\u{fffd}]"));
    }

    #[test]
    fn test_terminal_eof() {
        let mut console = TerminalConsole::new(Cursor::new(""), Vec::new());
        let err = console.read_line("Pick", Some("1")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_terminal_confirm_reasks_on_invalid() {
        let mut console = TerminalConsole::new(Cursor::new("what\nn\n"), Vec::new());
        assert!(!console.confirm("Sure?", true).unwrap());

        let (_, out) = console.into_inner();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Sure? [Y/n]: "));
        assert!(out.contains(INVALID_CONFIRM));
    }

    #[test]
    fn test_scripted_records_everything() {
        let mut console = ScriptedConsole::new(["", "x"]);
        console.puts("hello").unwrap();
        assert_eq!(console.read_line("Q", Some("d")).unwrap(), "d");
        assert_eq!(console.read_line("Q", None).unwrap(), "x");
        console.clear().unwrap();

        assert_eq!(console.output(), ["hello"]);
        assert_eq!(console.prompts().len(), 2);
        assert_eq!(console.clears(), 1);
        assert_eq!(console.remaining(), 0);
    }

    #[test]
    fn test_scripted_runs_out() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let err = console.confirm("Q", true).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
