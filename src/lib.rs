//! vto library crate.
//!
//! Terminal interaction helpers: numbered menus and other prompts, colored
//! output, inline images, clipboard copy, and call tracing.

pub mod clipboard;
pub mod config;
pub mod image;
pub mod prompt;
pub mod style;
pub mod trace;
pub mod util;

pub use clipboard::{copy_to_clipboard, ClipboardError};
pub use prompt::{ExitSignal, NumChoice, Selection};
pub use trace::Tracer;
