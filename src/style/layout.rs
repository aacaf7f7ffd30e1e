//! Indentation and header/footer separators.

use super::tint::{paint, Tint};

/// Left margin applied to every rendered line.
///
/// The margin is the (optionally colored) quote text padded with spaces up to
/// `width` visible columns. A quote wider than `width` is used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent {
    prefix: String,
}

impl Indent {
    /// Plain margin of `width` spaces.
    pub fn new(width: usize) -> Self {
        Self {
            prefix: " ".repeat(width),
        }
    }

    /// Margin that starts with `quote`, painted with `tint` when given.
    pub fn quoted(width: usize, quote: &str, tint: Option<Tint>) -> Self {
        let pad = width.saturating_sub(quote.chars().count());
        let quote = match tint {
            Some(tint) => paint(quote, tint),
            None => quote.to_string(),
        };
        Self {
            prefix: format!("{}{}", quote, " ".repeat(pad)),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Prefix every line of `text` with the margin.
    pub fn apply(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| format!("{}{}", self.prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::new(4)
    }
}

/// Header/footer separator lines: zero, one or two parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Separator(Vec<String>);

impl Separator {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    /// The same line above and below the block.
    pub fn single(line: impl Into<String>) -> Self {
        Self(vec![line.into()])
    }

    pub fn pair(header: impl Into<String>, footer: impl Into<String>) -> Self {
        Self(vec![header.into(), footer.into()])
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Resolve into `(header, footer)`; empty strings mean "no line".
    ///
    /// Any part count other than one or two yields no separators.
    pub fn header_footer(&self) -> (String, String) {
        match self.0.as_slice() {
            [line] => (line.clone(), line.clone()),
            [header, footer] => (header.clone(), footer.clone()),
            _ => (String::new(), String::new()),
        }
    }
}

impl From<&str> for Separator {
    fn from(line: &str) -> Self {
        if line.is_empty() {
            Self::none()
        } else {
            Self::single(line)
        }
    }
}

impl From<String> for Separator {
    fn from(line: String) -> Self {
        Separator::from(line.as_str())
    }
}

impl From<Vec<String>> for Separator {
    fn from(parts: Vec<String>) -> Self {
        Self(parts)
    }
}

impl<const N: usize> From<[&str; N]> for Separator {
    fn from(parts: [&str; N]) -> Self {
        Self(parts.iter().map(|p| p.to_string()).collect())
    }
}

/// Split separator parts into `(header, footer)`.
pub fn gen_separator(separator: impl Into<Separator>) -> (String, String) {
    separator.into().header_footer()
}
