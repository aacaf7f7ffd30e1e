//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{AlignArg, ColorArg};

/// Colorful terminal prompts, inline images and call tracing
#[derive(Parser, Debug)]
#[command(name = "vto")]
#[command(version, about = "Colorful terminal prompts and inline images", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log entry/exit and timing of the command
    #[arg(long, global = true)]
    pub trace: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a numbered menu and print the 0-based index (or token) chosen
    Choose {
        /// Menu entries
        #[arg(required = true)]
        choices: Vec<String>,

        /// Answer used when enter is pressed
        #[arg(long, short, default_value = "1")]
        default: String,

        /// Extra accepted answers, comma separated ("all" accepts anything)
        #[arg(long, default_value = "")]
        keys: String,

        /// Extra hints shown in the prompt, comma separated (e.g. "n-next,p-prev")
        #[arg(long, default_value = "")]
        hints: String,

        /// Nesting depth, selects the icon
        #[arg(long, default_value_t = 1)]
        depth: usize,

        /// Menu color (default from config)
        #[arg(long)]
        color: Option<ColorArg>,

        /// Serial number alignment (default from config)
        #[arg(long)]
        align: Option<AlignArg>,

        /// Header and optional footer line
        #[arg(long, num_args = 1..=2)]
        separator: Vec<String>,

        /// Image URL shown before each entry, in entry order
        #[arg(long = "image")]
        images: Vec<String>,

        /// Print "q" instead of exiting when the user quits
        #[arg(long)]
        no_quit: bool,

        /// Clear the screen when going back or quitting
        #[arg(long)]
        clear: bool,
    },

    /// Ask a yes/no question; exits 0 for yes and 1 for no
    Confirm {
        message: String,

        #[arg(long, default_value = "cyan")]
        color: ColorArg,

        #[arg(long, num_args = 1..=2)]
        separator: Vec<String>,
    },

    /// Show a message and wait for enter; "q" exits with a non-zero status
    Pause {
        message: String,

        #[arg(long, default_value = "green")]
        color: ColorArg,

        #[arg(long, num_args = 1..=2)]
        separator: Vec<String>,
    },

    /// Print a colored, indented message
    Echo {
        message: String,

        #[arg(long, default_value = "green")]
        color: ColorArg,

        #[arg(long, default_value_t = 4)]
        indent: usize,
    },

    /// Display an image file or URL inline (iTerm2 protocol)
    Image {
        /// Local path or http(s) URL
        source: String,

        /// Terminal rows (default from config)
        #[arg(long)]
        height: Option<u16>,

        /// Reuse a cached download
        #[arg(long)]
        use_cache: bool,
    },

    /// Copy text (or stdin) to the clipboard
    Copy { text: Option<String> },

    /// Image cache management
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Choose { .. } => "choose",
            Command::Confirm { .. } => "confirm",
            Command::Pause { .. } => "pause",
            Command::Echo { .. } => "echo",
            Command::Image { .. } => "image",
            Command::Copy { .. } => "copy",
            Command::Cache { .. } => "cache",
            Command::Config { .. } => "config",
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheAction {
    /// List cached images and their sizes
    List,
    /// Clear cached images (all or one by file name)
    Clear {
        /// File name to remove (clears all if not provided)
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
