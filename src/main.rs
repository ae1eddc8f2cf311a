//! tripane - a three-pane cascading file browser.
//!
//! Usage:
//!   tripane [ROOT]                         Launch the interactive browser
//!   tripane ls [DIR]                       List a directory
//!   tripane classify PATH                  Report whether a path is a file or folder
//!   tripane paste SOURCE TARGET_DIR        Copy SOURCE into TARGET_DIR
//!   tripane drop SOURCE DROP_TARGET        Move onto a folder, or copy to the fallback
//!   tripane open PATH                      Open with the system handler
//!   tripane --help                         Show help

mod logging;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};

use tripane_core::{ExplorerConfig, FilterView, FsError, PathEntry, read_listing};
use tripane_nav::NavigationState;
use tripane_ops::{Launcher, SystemLauncher};
use tripane_tui::{TuiConfig, UserSettings, format_size};

use crate::logging::LogTarget;

#[derive(Parser)]
#[command(
    name = "tripane",
    version,
    about = "A three-pane cascading file browser",
    long_about = "tripane lists a folder, its subfolders and their contents side by side.\n\n\
                  Launch the interactive browser by running `tripane [ROOT]`, or use \
                  subcommands for one-shot operations."
)]
struct Cli {
    /// Folder shown in the first pane (defaults to current directory)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Show hidden files
    #[arg(short = 'H', long)]
    hidden: bool,

    /// Command used to open files; the path is appended as the last argument
    #[arg(long, global = true)]
    opener: Option<String>,

    /// Where drops onto a file copy to (defaults to the desktop)
    #[arg(long)]
    drop_fallback: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List a directory, folders first
    Ls {
        /// Directory to list
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Only show names containing this text (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,

        /// Include hidden files
        #[arg(short, long)]
        all: bool,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Report whether a path is a file, a folder, or missing
    Classify {
        /// Path to check
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Copy SOURCE into TARGET_DIR, refusing to overwrite
    Paste {
        /// File or folder to copy
        source: PathBuf,

        /// Folder to paste into
        target_dir: PathBuf,
    },

    /// Drop SOURCE onto DROP_TARGET
    ///
    /// A folder target receives SOURCE (moved). Any other target leaves
    /// SOURCE in place and copies it to the fallback folder instead.
    Drop {
        /// File or folder being dragged
        source: PathBuf,

        /// Row it is dropped onto
        drop_target: PathBuf,

        /// Fallback folder for drops onto files
        #[arg(long)]
        fallback: Option<PathBuf>,
    },

    /// Open a path with the system handler
    Open {
        /// Path to open
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let settings = UserSettings::load();

    let target = if cli.command.is_some() {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    let guard = logging::init(target, settings.log_level.as_deref());

    if let Err(report) = run(cli, &settings) {
        let code = report
            .chain()
            .find_map(|e| e.downcast_ref::<FsError>())
            .map_or(1, |e| e.category().exit_code());
        eprintln!("Error: {report:?}");
        drop(guard);
        std::process::exit(code);
    }

    Ok(())
}

fn run(cli: Cli, settings: &UserSettings) -> Result<()> {
    let opener = cli.opener.or_else(|| settings.opener.clone());

    match cli.command {
        Some(Command::Ls {
            dir,
            filter,
            all,
            format,
        }) => run_ls(&dir, filter.as_deref(), all || settings.show_hidden, format),
        Some(Command::Classify { path, format }) => run_classify(&path, format),
        Some(Command::Paste { source, target_dir }) => run_paste(&source, &target_dir),
        Some(Command::Drop {
            source,
            drop_target,
            fallback,
        }) => {
            let fallback = fallback
                .or(cli.drop_fallback)
                .or_else(|| settings.drop_fallback.clone());
            run_drop(&source, &drop_target, fallback)
        }
        Some(Command::Open { path }) => {
            let launcher = SystemLauncher::from_config(opener.as_deref());
            launcher
                .open(&path)
                .wrap_err_with(|| format!("{} could not open the path", launcher.name()))
        }
        None => {
            let config = TuiConfig {
                show_hidden: cli.hidden.then_some(true),
                opener,
                drop_fallback: cli.drop_fallback,
            };
            tripane_tui::run_with_config(cli.root, config)
        }
    }
}

/// List a directory.
fn run_ls(dir: &Path, filter: Option<&str>, all: bool, format: OutputFormat) -> Result<()> {
    let config = ExplorerConfig::builder()
        .root(dir)
        .show_hidden(all)
        .build()
        .context("Invalid configuration")?;
    let entries = read_listing(&config.root, config.listing_options())?;
    let view = FilterView::new(filter.unwrap_or_default());
    let visible: Vec<_> = view
        .visible(&entries)
        .into_iter()
        .filter_map(|i| entries.get(i))
        .collect();

    match format {
        OutputFormat::Text => {
            for entry in &visible {
                let size = if entry.is_dir() {
                    String::new()
                } else {
                    format_size(entry.size)
                };
                let modified = entry
                    .modified
                    .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                let marker = if entry.is_dir() { "/" } else { "" };
                println!("{:>10}  {:<16}  {}{}", size, modified, entry.name, marker);
            }
            if !view.is_empty() {
                eprintln!("{} of {} entries match", visible.len(), entries.len());
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = visible
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "name": entry.name,
                        "path": entry.path,
                        "kind": entry.kind,
                        "size": entry.size,
                        "hidden": entry.hidden,
                        "modified": entry.modified.map(|t| DateTime::<Local>::from(t).to_rfc3339()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}

/// Classify a path.
fn run_classify(path: &Path, format: OutputFormat) -> Result<()> {
    let entry = PathEntry::resolve(path);
    match format {
        OutputFormat::Text => println!("{}\t{}", entry.kind, entry.path.display()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
    }
    Ok(())
}

/// Copy `source` into `target_dir` through the clipboard.
fn run_paste(source: &Path, target_dir: &Path) -> Result<()> {
    let mut nav = NavigationState::new(&ExplorerConfig::new(target_dir))
        .wrap_err_with(|| format!("Cannot paste into {}", target_dir.display()))?;

    let mode = nav.copy(source)?;
    let destination = nav.paste_into(target_dir)?;
    println!("Pasted {} ({mode}) to {}", source.display(), destination.display());
    Ok(())
}

/// Drop `source` onto `drop_target`.
fn run_drop(source: &Path, drop_target: &Path, fallback: Option<PathBuf>) -> Result<()> {
    let root = drop_target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let config = ExplorerConfig::builder()
        .root(root)
        .drop_fallback(fallback)
        .build()
        .context("Invalid configuration")?;
    let mut nav = NavigationState::new(&config)?;

    let outcome = nav.drop_onto(source, drop_target)?;
    println!("{}", outcome.summary());
    Ok(())
}
