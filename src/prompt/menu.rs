//! Numbered-choice menus.

use std::fmt::Display;

use serde::Deserialize;

use super::console::Console;
use super::{ExitSignal, PromptError, Selection, BACK_TOKENS, QUIT_TOKENS};
use crate::image::InlineImageSource;
use crate::style::{paint, Indent, Separator, Tint};

/// Depth glyphs shown in front of the menu lines.
pub const DEFAULT_ICONS: &str = "❶❷❸❹❺❻❼❽❾❿";

/// Keyword that makes a menu accept any response verbatim.
pub const ACCEPT_ANY: &str = "all";

const DEFAULT_HINTS: [&str; 2] = ["q-quit", "b-back"];

/// One glyph per nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icons {
    glyphs: Vec<String>,
    tint: Tint,
}

impl Icons {
    /// Every character of `glyphs` becomes the icon of one depth.
    pub fn from_glyphs(glyphs: &str) -> Self {
        Self {
            glyphs: glyphs.chars().map(|c| c.to_string()).collect(),
            tint: Tint::Magenta,
        }
    }

    pub fn tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph for a 1-based depth. Depths past the end reuse the last glyph.
    pub fn for_depth(&self, depth: usize) -> &str {
        let index = depth.max(1) - 1;
        self.glyphs
            .get(index)
            .or_else(|| self.glyphs.last())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Line margin for the given depth.
    fn indent(&self, width: usize, depth: usize) -> Indent {
        Indent::quoted(width, &format!(" {} ", self.for_depth(depth)), Some(self.tint))
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::from_glyphs(DEFAULT_ICONS)
    }
}

/// Alignment of the serial number inside its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Right,
}

/// How the 1-based index of each choice is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialFormat {
    pub align: Align,
    pub width: usize,
}

impl SerialFormat {
    /// `[ 1.]` for right alignment, `[1 .]` for left alignment.
    pub fn render(&self, index: usize) -> String {
        let width = self.width;
        match self.align {
            Align::Right => format!("[{:>width$}.]", index),
            Align::Left => format!("[{:<width$}.]", index),
        }
    }
}

impl Default for SerialFormat {
    fn default() -> Self {
        Self {
            align: Align::Right,
            width: 2,
        }
    }
}

/// Presentation settings shared by every menu of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuStyle {
    pub icons: Icons,
    pub serial: SerialFormat,
    pub indent: usize,
    pub color: Tint,
    pub separator: Separator,
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self {
            icons: Icons::default(),
            serial: SerialFormat::default(),
            indent: 4,
            color: Tint::Green,
            separator: Separator::none(),
        }
    }
}

/// Which responses besides `1..N`, quit and back are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidKeys {
    /// Only the numeric indices.
    #[default]
    Numeric,
    /// Any response is returned verbatim.
    Any,
    /// The listed tokens are returned verbatim.
    Only(Vec<String>),
}

impl ValidKeys {
    fn allows(&self, answer: &str) -> bool {
        match self {
            ValidKeys::Only(keys) => keys.iter().any(|k| k == answer),
            _ => false,
        }
    }
}

impl From<&str> for ValidKeys {
    /// `""` → numeric only, `"all"` → anything, otherwise a comma-separated list.
    fn from(keys: &str) -> Self {
        match keys {
            "" => ValidKeys::Numeric,
            ACCEPT_ANY => ValidKeys::Any,
            list => ValidKeys::Only(list.split(',').map(str::to_string).collect()),
        }
    }
}

struct ImageRows<'a> {
    source: &'a dyn InlineImageSource,
    references: &'a [String],
}

/// A numbered menu, built up and then shown with [`NumChoice::ask`].
///
/// ```no_run
/// use vto::prompt::{NumChoice, Selection, TerminalConsole};
///
/// let fruits = ["apple", "banana"];
/// let mut console = TerminalConsole::stdio();
/// match NumChoice::new(&fruits).ask(&mut console).unwrap() {
///     Some(Selection::Index(i)) => println!("picked {}", fruits[i]),
///     Some(Selection::Exit(signal)) => signal.terminate(),
///     other => println!("{:?}", other),
/// }
/// ```
pub struct NumChoice<'a, S> {
    choices: &'a [S],
    default: Option<String>,
    valid_keys: ValidKeys,
    depth: usize,
    style: MenuStyle,
    images: Option<ImageRows<'a>>,
    extra_hints: Vec<String>,
    clear_previous: bool,
    quit_app: bool,
}

impl<'a, S: Display> NumChoice<'a, S> {
    pub fn new(choices: &'a [S]) -> Self {
        Self {
            choices,
            default: Some("1".to_string()),
            valid_keys: ValidKeys::Numeric,
            depth: 1,
            style: MenuStyle::default(),
            images: None,
            extra_hints: Vec::new(),
            clear_previous: false,
            quit_app: true,
        }
    }

    /// Answer used when the user just presses enter.
    pub fn default_key(mut self, default: impl Display) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn no_default(mut self) -> Self {
        self.default = None;
        self
    }

    pub fn valid_keys(mut self, keys: impl Into<ValidKeys>) -> Self {
        self.valid_keys = keys.into();
        self
    }

    /// 1-based nesting depth, selects the icon.
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn style(mut self, style: MenuStyle) -> Self {
        self.style = style;
        self
    }

    /// Show an inline image before each choice. `references` is index-aligned
    /// with the choices.
    pub fn images(mut self, source: &'a dyn InlineImageSource, references: &'a [String]) -> Self {
        self.images = Some(ImageRows { source, references });
        self
    }

    /// Extra entries for the hint line, e.g. `["n-next", "p-prev"]`.
    pub fn extra_hints<I, H>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        self.extra_hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Comma-separated form of [`NumChoice::extra_hints`].
    pub fn extra_hints_str(self, hints: &str) -> Self {
        let hints: Vec<String> = if hints.is_empty() {
            Vec::new()
        } else {
            hints.split(',').map(str::to_string).collect()
        };
        self.extra_hints(hints)
    }

    /// Clear the screen before returning quit/back.
    pub fn clear_previous(mut self, clear: bool) -> Self {
        self.clear_previous = clear;
        self
    }

    /// When set, quitting yields [`Selection::Exit`] instead of [`Selection::Quit`].
    pub fn quit_app(mut self, quit: bool) -> Self {
        self.quit_app = quit;
        self
    }

    /// `Your Choice(q-quit/b-back/...)?`
    pub fn hint_line(&self) -> String {
        let hints: Vec<&str> = DEFAULT_HINTS
            .iter()
            .copied()
            .chain(self.extra_hints.iter().map(String::as_str))
            .collect();
        format!("Your Choice({})?", hints.join("/"))
    }

    /// Render the menu, read one answer and resolve it, re-rendering after
    /// every invalid answer. Returns `None` for an empty choice list.
    pub fn ask(&self, console: &mut dyn Console) -> Result<Option<Selection>, PromptError> {
        if self.choices.is_empty() {
            return Ok(None);
        }

        let prompt = paint(self.hint_line(), Tint::Cyan);
        loop {
            self.render(console)?;
            let answer = console.read_line(&prompt, self.default.as_deref())?;

            match self.resolve(&answer) {
                Some(selection) => {
                    let clears = matches!(selection, Selection::Quit(_) | Selection::Back(_));
                    if clears && self.clear_previous {
                        console.clear()?;
                    }
                    return Ok(Some(selection));
                }
                None => {
                    log::debug!("Rejected menu answer {:?}", answer);
                    console.puts(&paint(format!("  😭 ✘ Invalid input[{}]", answer), Tint::Red))?;
                }
            }
        }
    }

    /// Map an answer to a selection; `None` means the answer is invalid.
    pub fn resolve(&self, answer: &str) -> Option<Selection> {
        if QUIT_TOKENS.contains(&answer) {
            return Some(if self.quit_app {
                Selection::Exit(ExitSignal::success())
            } else {
                Selection::Quit(answer.to_string())
            });
        }
        if self.valid_keys == ValidKeys::Any {
            return Some(Selection::Key(answer.to_string()));
        }
        if BACK_TOKENS.contains(&answer) {
            return Some(Selection::Back(answer.to_string()));
        }
        if self.valid_keys.allows(answer) {
            return Some(Selection::Key(answer.to_string()));
        }

        let index = self.parse_index(answer)?;
        Some(Selection::Index(index))
    }

    /// Only the canonical strings `"1"..="N"` are indices.
    fn parse_index(&self, answer: &str) -> Option<usize> {
        let n: usize = answer.parse().ok()?;
        let canonical = n.to_string() == answer;
        (canonical && (1..=self.choices.len()).contains(&n)).then(|| n - 1)
    }

    fn render(&self, console: &mut dyn Console) -> Result<(), PromptError> {
        let style = &self.style;
        let indent = style.icons.indent(style.indent, self.depth);
        let (header, footer) = style.separator.header_footer();

        if !header.is_empty() {
            console.puts(&indent.apply(&paint(&header, style.color)))?;
        }

        for (i, choice) in self.choices.iter().enumerate() {
            if let Some(rows) = &self.images {
                if rows.source.rows() > 0 {
                    if let Some(reference) = rows.references.get(i) {
                        console.puts(&indent.apply(&rows.source.inline(reference)?))?;
                    }
                }
            }

            let line = format!(
                "{}{}",
                paint(style.serial.render(i + 1), Tint::Magenta),
                paint(format!(" {}", choice), style.color)
            );
            console.puts(&indent.apply(&line))?;
        }

        if !footer.is_empty() {
            console.puts(&indent.apply(&paint(&footer, style.color)))?;
        }
        Ok(())
    }
}
