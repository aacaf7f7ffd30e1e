//! Text styling helpers shared by the prompts and the call tracer.
//!
//! Colors are applied with crossterm's `Stylize`, so output degrades to plain
//! text when `NO_COLOR` is set.

mod help;
mod layout;
mod tint;

pub use help::{fmt_help, DEFAULT_OPT_HINT};
pub use layout::{gen_separator, Indent, Separator};
pub use tint::{paint, Tint};
