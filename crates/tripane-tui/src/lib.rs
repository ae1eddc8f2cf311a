//! Terminal user interface for tripane.
//!
//! Three cascading panes, built with ratatui: picking a folder in one pane
//! lists it in the next.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Browse a directory
//! tripane_tui::run(PathBuf::from("/path/to/browse")).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `Tab`/`h` - Switch pane
//! - `l` - Select (opens a folder in the next pane)
//! - `Enter` - Open with the system handler
//! - `y`/`p` - Copy / paste
//! - `m`/`D` - Pick up / drop
//! - `/` - Filter the focused pane
//! - `?` - Help
//! - `q` - Quit

pub mod app;
mod event;
mod theme;
mod ui;

use std::path::PathBuf;

pub use app::settings::UserSettings;
pub use app::{App, AppResult};
pub use theme::{Theme, ThemeVariant};
pub use ui::format_size;

/// Options from the command line. Set fields override saved settings.
#[derive(Debug, Clone, Default)]
pub struct TuiConfig {
    /// Include hidden files.
    pub show_hidden: Option<bool>,
    /// Command used to open files.
    pub opener: Option<String>,
    /// Where drops onto a file copy to.
    pub drop_fallback: Option<PathBuf>,
}

/// Run the TUI application.
pub fn run(root: PathBuf) -> AppResult<()> {
    run_with_config(root, TuiConfig::default())
}

/// Run the TUI application with command-line overrides.
pub fn run_with_config(root: PathBuf, config: TuiConfig) -> AppResult<()> {
    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    // Fail before touching the terminal if the root is unusable.
    let app = App::new(root, config)?;

    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
