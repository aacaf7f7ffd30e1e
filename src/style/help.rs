//! Help text formatting for command descriptions.

use crossterm::style::Stylize;

pub const DEFAULT_OPT_HINT: &str = "[OPT] ";

/// Format a help entry: the first part is the description, the rest are usage
/// fragments shown on a second line after `opt_hint` when `show_more` is set.
pub fn fmt_help<S: AsRef<str>>(parts: &[S], show_more: bool, opt_hint: &str) -> String {
    let Some((description, usage)) = parts.split_first() else {
        return String::new();
    };

    let mut out = description.as_ref().bold().to_string();
    if show_more && !usage.is_empty() {
        out.push('\n');
        out.push_str(&opt_hint.italic().cyan().to_string());
        for part in usage {
            out.push_str(&part.as_ref().italic().cyan().to_string());
        }
    }
    out
}
