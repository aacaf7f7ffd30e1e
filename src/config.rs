//! Configuration file handling for vto.
//!
//! Loads configuration from `~/.config/vto/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::image::{default_dir, ImageCache, ImageError, ImageFetcher, NetImage};
use crate::prompt::{Align, Icons, MenuStyle, SerialFormat, DEFAULT_ICONS};
use crate::style::{Separator, Tint};
use crate::trace::Tracer;

/// Configuration file structure for vto.
/// Loaded from ~/.config/vto/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MenuConfig {
    pub indent: usize,
    pub color: Tint,
    pub icons: String,
    pub serial_align: Align,
    pub serial_width: usize,
    pub separator: Vec<String>,
    /// Quitting a menu exits the application.
    pub quit_app: bool,
    pub clear_previous: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            color: Tint::Green,
            icons: DEFAULT_ICONS.to_string(),
            serial_align: Align::Right,
            serial_width: 2,
            separator: Vec::new(),
            quit_app: true,
            clear_previous: false,
        }
    }
}

impl MenuConfig {
    pub fn style(&self) -> MenuStyle {
        MenuStyle {
            icons: Icons::from_glyphs(&self.icons),
            serial: SerialFormat {
                align: self.serial_align,
                width: self.serial_width,
            },
            indent: self.indent,
            color: self.color,
            separator: Separator::from(self.separator.clone()),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    /// Terminal rows per image; 0 disables images in menus.
    pub height: u16,
    pub cache_dir: Option<PathBuf>,
    pub use_cache: bool,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            height: 6,
            cache_dir: None,
            use_cache: false,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ImageConfig {
    pub fn cache(&self) -> ImageCache {
        ImageCache::new(self.cache_dir.clone().unwrap_or_else(default_dir))
    }

    pub fn fetcher(&self) -> Result<ImageFetcher, ImageError> {
        ImageFetcher::with_timeouts(
            Duration::from_secs(self.timeout_secs),
            Duration::from_secs(self.connect_timeout_secs),
        )
    }

    pub fn renderer(&self) -> Result<NetImage, ImageError> {
        Ok(NetImage::new(self.cache(), self.fetcher()?)
            .height(self.height)
            .use_cache(self.use_cache))
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TraceConfig {
    pub enabled: bool,
    pub hint: String,
    pub print_args: bool,
    pub print_return: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hint: "cost".to_string(),
            print_args: false,
            print_return: false,
        }
    }
}

impl TraceConfig {
    pub fn tracer(&self) -> Tracer {
        Tracer::new()
            .enabled(self.enabled)
            .hint(self.hint.as_str())
            .print_args(self.print_args)
            .print_return(self.print_return)
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            section: source
                .span()
                .and_then(|span| section_at(&content, span.start))
                .map(|name| format!("section [{}]", name))
                .unwrap_or_else(|| "top level".to_string()),
            path,
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Name of the `[table]` a byte offset of `content` falls in.
fn section_at(content: &str, offset: usize) -> Option<String> {
    content
        .get(..offset)
        .unwrap_or(content)
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with('['))
        .map(|line| line.trim_matches(|c: char| c == '[' || c == ']').trim().to_string())
}

/// Errors that can occur when loading the vto config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read vto config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `section` is `section [name]` or `top level`.
    #[error("Invalid vto config '{}' ({section}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        section: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("vto").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/vto/config.toml")
        })
}

/// Template written by `vto config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# vto configuration

[menu]
# Spaces in front of each menu line
indent = 4
# black, red, green, yellow, blue, magenta, cyan, white
color = "green"
# One glyph per nesting depth
icons = "❶❷❸❹❺❻❼❽❾❿"
# Serial number column: "left" or "right", and its width
serial_align = "right"
serial_width = 2
# Zero, one or two lines printed above/below the menu
separator = []
# Quitting a menu exits the application
quit_app = true
# Clear the screen when going back or quitting
clear_previous = false

[image]
# Terminal rows per inline image (0 disables images)
height = 6
# cache_dir = "/tmp/vto"
use_cache = false
timeout_secs = 30
connect_timeout_secs = 10

[trace]
enabled = true
hint = "cost"
print_args = false
print_return = false
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.menu.quit_app);
        assert_eq!(config.image.height, 6);
    }

    #[test]
    fn test_default_template_matches_defaults() {
        let config = Config::parse(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
[menu]
color = "cyan"
serial_align = "left"
separator = ["--", "=="]

[trace]
enabled = false
"#,
        )
        .unwrap();

        assert_eq!(config.menu.color, Tint::Cyan);
        assert_eq!(config.menu.indent, 4);
        assert_eq!(config.trace.hint, "cost");
        assert!(!config.trace.enabled);

        let style = config.menu.style();
        assert_eq!(style.serial.render(1), "[1 .]");
        assert_eq!(
            style.separator.header_footer(),
            ("--".to_string(), "==".to_string())
        );
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[menu]\ncolor = \"purple\"\n").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        match &err {
            ConfigError::Parse { section, .. } => assert_eq!(section, "section [menu]"),
            other => panic!("expected parse error, got {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("config.toml"));
        assert!(message.contains("section [menu]"));
    }

    #[test]
    fn test_parse_error_outside_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "menu = 3\n").unwrap();

        match Config::load(Some(path.as_path())).unwrap_err() {
            ConfigError::Parse { section, .. } => assert_eq!(section, "top level"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_section_at() {
        let content = "[menu]\nindent = 2\n\n[image]\nheight = \"x\"\n";
        assert_eq!(section_at(content, content.find("indent").unwrap()).as_deref(), Some("menu"));
        assert_eq!(section_at(content, content.find("\"x\"").unwrap()).as_deref(), Some("image"));
        assert_eq!(section_at("a = 1", 2), None);
    }

    #[test]
    fn test_image_cache_dir_override() {
        let config = Config::parse("[image]\ncache_dir = \"/tmp/vto\"\n").unwrap();
        assert_eq!(config.image.cache().cache_dir(), Path::new("/tmp/vto"));
    }

    #[test]
    fn test_default_path_ends_with_vto_config() {
        let path = default_path();
        assert!(path.ends_with("vto/config.toml"));
    }
}
