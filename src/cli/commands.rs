//! Subcommand handlers. Handlers return user-facing error strings; `main`
//! prints them and exits with status 1.

use std::io::Read;
use std::path::{Path, PathBuf};

use vto::config::{default_path as get_config_path, Config, DEFAULT_CONFIG_TOML};
use vto::image::{inline_path, ImageCache, InlineImageSource};
use vto::prompt::{
    color_print, pause_choice, yn_choice, MessageStyle, NumChoice, Paused, Selection,
    TerminalConsole,
};
use vto::style::{Separator, Tint};

use super::args::{CacheAction, Command, ConfigAction};

/// Run one subcommand. `config_path` is the `--config` override, if any.
pub fn run(command: Command, config: &Config, config_path: Option<&Path>) -> Result<(), String> {
    match command {
        Command::Choose {
            choices,
            default,
            keys,
            hints,
            depth,
            color,
            align,
            separator,
            images,
            no_quit,
            clear,
        } => {
            let mut style = config.menu.style();
            if let Some(color) = color {
                style.color = color.into();
            }
            if let Some(align) = align {
                style.serial.align = align.into();
            }
            if !separator.is_empty() {
                style.separator = Separator::from(separator);
            }

            let renderer = if images.is_empty() {
                None
            } else {
                Some(
                    config
                        .image
                        .renderer()
                        .map_err(|e| format!("Failed to set up image download: {}", e))?,
                )
            };

            let mut menu = NumChoice::new(&choices)
                .default_key(default)
                .valid_keys(keys.as_str())
                .depth(depth)
                .style(style)
                .extra_hints_str(&hints)
                .clear_previous(clear || config.menu.clear_previous)
                .quit_app(!no_quit && config.menu.quit_app);
            if let Some(renderer) = &renderer {
                menu = menu.images(renderer as &dyn InlineImageSource, &images);
            }

            let mut console = TerminalConsole::stdio();
            match menu.ask(&mut console).map_err(|e| e.to_string())? {
                Some(Selection::Index(index)) => println!("{}", index),
                Some(Selection::Back(token))
                | Some(Selection::Quit(token))
                | Some(Selection::Key(token)) => println!("{}", token),
                Some(Selection::Exit(signal)) => signal.terminate(),
                None => {}
            }
            Ok(())
        }
        Command::Confirm {
            message,
            color,
            separator,
        } => {
            let style = MessageStyle::new(color.into()).separator(Separator::from(separator));
            let mut console = TerminalConsole::stdio();
            let yes = yn_choice(&mut console, &message, &style).map_err(|e| e.to_string())?;
            if !yes {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Pause {
            message,
            color,
            separator,
        } => {
            let style = MessageStyle::new(color.into()).separator(Separator::from(separator));
            let mut console = TerminalConsole::stdio();
            match pause_choice(&mut console, &message, &style).map_err(|e| e.to_string())? {
                Paused::Exit(signal) => signal.terminate(),
                Paused::Continue(_) => Ok(()),
            }
        }
        Command::Echo {
            message,
            color,
            indent,
        } => {
            let mut console = TerminalConsole::stdio();
            color_print(&mut console, &message, indent, Tint::from(color)).map_err(|e| e.to_string())
        }
        Command::Image {
            source,
            height,
            use_cache,
        } => show_image(&source, height, use_cache, config),
        Command::Copy { text } => copy(text),
        Command::Cache { action } => handle_cache_action(action, config),
        Command::Config { action } => handle_config_action(action, config, config_path),
    }
}

fn show_image(source: &str, height: Option<u16>, use_cache: bool, config: &Config) -> Result<(), String> {
    let height = height.unwrap_or(config.image.height);

    let sequence = if source.starts_with("http://") || source.starts_with("https://") {
        let renderer = config
            .image
            .renderer()
            .map_err(|e| format!("Failed to set up image download: {}", e))?
            .height(height)
            .use_cache(use_cache || config.image.use_cache);
        renderer
            .inline(source)
            .map_err(|e| format!("Failed to load image: {}", e))?
    } else {
        inline_path(Path::new(source), height)
            .map_err(|e| format!("Failed to read image '{}': {}", source, e))?
    };

    println!("{}", sequence);
    Ok(())
}

fn copy(text: Option<String>) -> Result<(), String> {
    let data = match text {
        Some(text) => text.into_bytes(),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            buf
        }
    };
    vto::copy_to_clipboard(&data).map_err(|e| e.to_string())
}

/// Handle cache subcommand actions.
fn handle_cache_action(action: CacheAction, config: &Config) -> Result<(), String> {
    let cache: ImageCache = config.image.cache();

    match action {
        CacheAction::List => {
            let entries = cache
                .list_entries()
                .map_err(|e| format!("Failed to list cache entries: {}", e))?;

            if entries.is_empty() {
                println!("Cache is empty.");
                return Ok(());
            }

            println!("Cached images in {}:\n", cache.cache_dir().display());
            for entry in &entries {
                println!("  {:>10}  {}", format_size(entry.size_bytes), entry.name);
            }

            let total_size: u64 = entries.iter().map(|e| e.size_bytes).sum();
            println!("\nTotal: {} images, {}", entries.len(), format_size(total_size));
            Ok(())
        }
        CacheAction::Clear { name } => {
            match name {
                Some(name) => {
                    let removed = cache
                        .remove(&name)
                        .map_err(|e| format!("Failed to remove cached image: {}", e))?;

                    if removed {
                        println!("Removed cached image: {}", name);
                    } else {
                        println!("No cached image named: {}", name);
                    }
                }
                None => {
                    let count = cache
                        .clear_all()
                        .map_err(|e| format!("Failed to clear cache: {}", e))?;

                    if count == 0 {
                        println!("Cache is already empty.");
                    } else {
                        println!("Removed {} cached image{}.", count, if count == 1 { "" } else { "s" });
                    }
                }
            }
            Ok(())
        }
    }
}

/// Handle config subcommand actions.
fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let config_path = config_file(config_path);

    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!("  Menu color: {}", config.menu.color);
            println!("  Menu indent: {}", config.menu.indent);
            println!("  Icons: {}", config.menu.icons);
            println!("  Quit exits app: {}", yes_no(config.menu.quit_app));
            println!("  Image height: {} rows", config.image.height);
            println!("  Image cache: {}", config.image.cache().cache_dir().display());
            println!("  Use image cache: {}", yes_no(config.image.use_cache));
            println!("  Tracing: {}", yes_no(config.trace.enabled));
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'vto config show' to view current settings.",
                    config_path.display()
                ));
            }

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            std::fs::write(&config_path, DEFAULT_CONFIG_TOML)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", config_path.display());
            Ok(())
        }
    }
}

/// The file `config` commands operate on.
fn config_file(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(get_config_path)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Human readable size for cache listings, e.g. `512 B` or `2.00 KB`.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = "B";
    for next in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{:.2} {}", value, unit)
}
