//! Application state and logic.

mod constants;
pub mod input;
mod render;
pub mod settings;
pub mod state;

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::Duration;

use color_eyre::eyre::WrapErr;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use tripane_core::{ExplorerConfig, FsError};
use tripane_nav::{Level, NavigationState};
use tripane_ops::{
    CancellationToken, JobOutcome, Launcher, TransferEvent, TransferOptions, TransferRequest,
    start_transfer,
};

use crate::TuiConfig;
use crate::event::KeyAction;
use crate::theme::Theme;

use self::constants::{PAGE_SIZE, TICK_INTERVAL_MS};
use self::input::{InputResult, InputState};
use self::render::{RenderContext, render_app};
use self::settings::UserSettings;
use self::state::{ActiveTransfer, AppMode, PaneState, PendingTransfer, StatusMessage};

/// Result type for the application.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    nav: NavigationState,
    panes: [PaneState; 3],
    focus: Level,
    mode: AppMode,
    theme: Theme,
    settings: UserSettings,
    /// Where toggled settings are written. `None` keeps them in memory.
    settings_path: Option<PathBuf>,
    input: Option<InputState>,
    drag_source: Option<PathBuf>,
    status: Option<StatusMessage>,
    transfer: Option<ActiveTransfer>,
    preserve_metadata: bool,
    /// Opener to run with the terminal handed over, after the current event.
    pending_suspend: Option<(PathBuf, Command)>,
    needs_redraw: bool,
}

impl App {
    /// Create a new app rooted at `root`, loading saved settings.
    pub fn new(root: PathBuf, config: TuiConfig) -> AppResult<Self> {
        let mut app = Self::with_settings(root, config, UserSettings::load())?;
        app.settings_path = UserSettings::config_path();
        Ok(app)
    }

    /// Create a new app with explicit settings that are never written back.
    pub fn with_settings(
        root: PathBuf,
        config: TuiConfig,
        settings: UserSettings,
    ) -> AppResult<Self> {
        let explorer = ExplorerConfig::builder()
            .root(root.clone())
            .show_hidden(config.show_hidden.unwrap_or(settings.show_hidden))
            .opener(config.opener.or_else(|| settings.opener.clone()))
            .drop_fallback(
                config
                    .drop_fallback
                    .or_else(|| settings.drop_fallback.clone()),
            )
            .build()
            .wrap_err("invalid explorer configuration")?;

        let nav = NavigationState::new(&explorer)
            .wrap_err_with(|| format!("cannot browse {}", root.display()))?;
        tracing::info!(
            root = %root.display(),
            launcher = nav.launcher().name(),
            "starting browser"
        );

        let mut app = Self {
            nav,
            panes: Default::default(),
            focus: Level::Top,
            mode: AppMode::Normal,
            theme: Theme::from_variant(settings.theme),
            settings,
            settings_path: None,
            input: None,
            drag_source: None,
            status: None,
            transfer: None,
            preserve_metadata: explorer.preserve_metadata,
            pending_suspend: None,
            needs_redraw: true,
        };
        app.reload_all();
        Ok(app)
    }

    /// Run the application main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    if let Event::Key(key_event) = event
                        && key_event.kind == KeyEventKind::Press
                    {
                        self.handle_key(key_event);
                    }
                    self.needs_redraw = true;
                }

                event = async {
                    if let Some(transfer) = &mut self.transfer {
                        transfer.rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    match event {
                        Some(event) => self.handle_transfer_event(event),
                        None => self.transfer_lost(),
                    }
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {
                    // Periodic tick for background updates
                }
            }

            if let Some((path, mut cmd)) = self.pending_suspend.take() {
                ratatui::restore();
                let status = cmd.status();
                terminal = ratatui::init();
                self.finish_foreground(&path, status);
                self.needs_redraw = true;
            }
        }

        if let Some(transfer) = self.transfer.take() {
            transfer.cancel.cancel();
        }

        Ok(())
    }

    /// Route a key press according to the current mode.
    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.mode = AppMode::Quit;
            return;
        }

        match self.mode {
            AppMode::Filter => self.handle_filter_input(key),
            AppMode::PastePrompt => self.handle_paste_input(key),
            _ => self.handle_action(KeyAction::from_key_event(key)),
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match self.mode {
            AppMode::Help => {
                if matches!(
                    action,
                    KeyAction::ToggleHelp | KeyAction::Cancel | KeyAction::Quit
                ) {
                    self.mode = AppMode::Normal;
                }
                return;
            }
            AppMode::Transferring => {
                if action == KeyAction::Cancel
                    && let Some(transfer) = &self.transfer
                {
                    tracing::info!(source = %transfer.source.display(), "cancelling transfer");
                    transfer.cancel.cancel();
                }
                return;
            }
            _ => {}
        }

        match action {
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,

            KeyAction::MoveUp => self.pane_mut().move_up(1),
            KeyAction::MoveDown => self.pane_mut().move_down(1),
            KeyAction::PageUp => self.pane_mut().move_up(PAGE_SIZE),
            KeyAction::PageDown => self.pane_mut().move_down(PAGE_SIZE),
            KeyAction::JumpToTop => self.pane_mut().jump_to_top(),
            KeyAction::JumpToBottom => self.pane_mut().jump_to_bottom(),

            KeyAction::FocusNext => {
                self.focus = self.focus.next().unwrap_or(Level::Top);
            }
            KeyAction::FocusPrev => {
                self.focus = self.focus.prev().unwrap_or(Level::Inner);
            }
            KeyAction::FocusLeft => {
                if let Some(prev) = self.focus.prev() {
                    self.focus = prev;
                }
            }

            KeyAction::Select => self.select_current(),
            KeyAction::Activate => self.activate_current(),
            KeyAction::Copy => self.copy_current(),
            KeyAction::Paste => self.open_paste_prompt(),
            KeyAction::PickUp => self.pick_up_current(),
            KeyAction::Drop => self.drop_on_current(),

            KeyAction::Filter => {
                let needle = self.pane().filter().needle().to_string();
                self.input = Some(InputState::with_initial(&needle));
                self.mode = AppMode::Filter;
            }
            KeyAction::Refresh => {
                self.reload_all();
                self.status = Some(StatusMessage::info("Refreshed"));
            }
            KeyAction::ToggleHidden => {
                let show = !self.nav.show_hidden();
                self.nav.set_show_hidden(show);
                self.settings.show_hidden = show;
                self.persist_settings();
                self.reload_all();
                self.status = Some(StatusMessage::info(if show {
                    "Showing hidden files"
                } else {
                    "Hiding hidden files"
                }));
            }
            KeyAction::ToggleTheme => {
                self.theme = self.theme.toggle();
                self.settings.theme = self.theme.variant;
                self.persist_settings();
            }
            KeyAction::ToggleHelp => self.mode = AppMode::Help,

            KeyAction::Cancel => {
                if let Some(source) = self.drag_source.take() {
                    tracing::debug!(source = %source.display(), "drag released");
                }
                self.status = None;
            }

            KeyAction::None => {}
        }
    }

    fn handle_filter_input(&mut self, key: KeyEvent) {
        let Some(input) = &mut self.input else {
            self.mode = AppMode::Normal;
            return;
        };

        match input.handle_key(key) {
            InputResult::Continue => {
                let needle = input.buffer().to_string();
                self.pane_mut().set_filter(&needle);
            }
            InputResult::Cancel => {
                let original = input.original().unwrap_or_default().to_string();
                self.pane_mut().set_filter(&original);
                self.close_input();
            }
            InputResult::Submit(needle) => {
                self.pane_mut().set_filter(&needle);
                self.close_input();
            }
        }
    }

    fn handle_paste_input(&mut self, key: KeyEvent) {
        let Some(input) = &mut self.input else {
            self.mode = AppMode::Normal;
            return;
        };

        match input.handle_key(key) {
            InputResult::Continue => {}
            InputResult::Cancel => self.close_input(),
            InputResult::Submit(value) => {
                let target = expand_home(value.trim());
                match self.nav.plan_paste(&target) {
                    Ok(plan) => {
                        self.close_input();
                        self.start_job(plan.request(), PendingTransfer::Paste(plan));
                    }
                    Err(e) => input.set_error(e.to_string()),
                }
            }
        }
    }

    fn close_input(&mut self) {
        self.input = None;
        self.mode = AppMode::Normal;
    }

    fn pane(&self) -> &PaneState {
        &self.panes[self.focus.index()]
    }

    fn pane_mut(&mut self) -> &mut PaneState {
        &mut self.panes[self.focus.index()]
    }

    fn current_path(&self) -> Option<PathBuf> {
        self.pane().selected_path().map(Path::to_path_buf)
    }

    /// Select the row under the cursor, cascading into the next pane.
    fn select_current(&mut self) {
        let Some(path) = self.current_path() else {
            return;
        };

        if self.nav.select(self.focus, &path)
            && let Some(next) = self.focus.next()
        {
            for level in [Level::Middle, Level::Inner] {
                if level.index() >= next.index() {
                    self.reload(level);
                    self.panes[level.index()].jump_to_top();
                }
            }
            self.focus = next;
            self.status = None;
        }
    }

    fn activate_current(&mut self) {
        let Some(path) = self.current_path() else {
            return;
        };

        // Openers that need the terminal run from the main loop.
        match self.nav.foreground_command(&path) {
            Ok(Some(cmd)) => {
                tracing::debug!(path = %path.display(), "handing terminal to opener");
                self.pending_suspend = Some((path, cmd));
                return;
            }
            Ok(None) => {}
            Err(e) => {
                self.status = Some(StatusMessage::error(&e));
                return;
            }
        }

        self.status = Some(match self.nav.activate(&path) {
            Ok(()) => StatusMessage::info(format!("Opened {}", display_name(&path))),
            Err(e) => StatusMessage::error(&e),
        });
    }

    /// Report how a foreground opener ended.
    fn finish_foreground(&mut self, path: &Path, status: std::io::Result<ExitStatus>) {
        let name = self.nav.launcher().name().to_string();
        let result = match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(FsError::launch(path, format!("{name} exited with {status}"))),
            Err(e) => Err(FsError::launch(path, format!("could not run {name}: {e}"))),
        };

        self.status = Some(match result {
            Ok(()) => StatusMessage::info(format!("Opened {}", display_name(path))),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not open path");
                StatusMessage::error(&e)
            }
        });
        // The opener may have changed the listed folders.
        self.reload_all();
    }

    fn copy_current(&mut self) {
        let Some(path) = self.current_path() else {
            return;
        };

        self.status = Some(match self.nav.copy(&path) {
            Ok(mode) => StatusMessage::info(format!(
                "Copied {} ({mode}) - press p to paste",
                display_name(&path)
            )),
            Err(e) => StatusMessage::error(&e),
        });
    }

    fn open_paste_prompt(&mut self) {
        if self.transfer.is_some() {
            self.status = Some(StatusMessage::info("A transfer is already running"));
            return;
        }
        if self.nav.clipboard().is_empty() {
            self.status = Some(StatusMessage::error(&FsError::EmptyClipboard));
            return;
        }

        let initial = self
            .nav
            .level(self.focus)
            .root()
            .or_else(|| self.nav.level(Level::Top).root())
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.input = Some(InputState::with_initial(&initial));
        self.mode = AppMode::PastePrompt;
    }

    fn pick_up_current(&mut self) {
        let Some(path) = self.current_path() else {
            return;
        };

        if self.drag_source.as_deref() == Some(path.as_path()) {
            self.drag_source = None;
            self.status = None;
            return;
        }

        tracing::debug!(source = %path.display(), "picked up");
        self.status = Some(StatusMessage::info(format!(
            "Dragging {} - move to a row and press D",
            display_name(&path)
        )));
        self.drag_source = Some(path);
    }

    fn drop_on_current(&mut self) {
        let Some(source) = self.drag_source.clone() else {
            self.status = Some(StatusMessage::info("Nothing picked up - press m on a row first"));
            return;
        };
        let Some(target) = self.current_path() else {
            self.status = Some(StatusMessage::info("No row to drop onto"));
            return;
        };
        if target == source {
            return;
        }

        let request = self.nav.drop_request(&source, &target);
        self.start_job(request, PendingTransfer::Drop { source });
    }

    /// Run `request` in the background. Refused while another transfer runs.
    fn start_job(&mut self, request: TransferRequest, pending: PendingTransfer) {
        if self.transfer.is_some() {
            self.status = Some(StatusMessage::info("A transfer is already running"));
            return;
        }

        tracing::info!(source = %request.source().display(), kind = %request.kind(), "transfer started");
        let cancel = CancellationToken::new();
        let rx = start_transfer(
            request.clone(),
            TransferOptions {
                preserve_metadata: self.preserve_metadata,
            },
            cancel.clone(),
        );

        self.transfer = Some(ActiveTransfer {
            kind: request.kind(),
            source: request.source().to_path_buf(),
            rx,
            cancel,
            progress: None,
            pending,
        });
        self.status = None;
        self.mode = AppMode::Transferring;
    }

    fn handle_transfer_event(&mut self, event: TransferEvent) {
        match event {
            TransferEvent::Progress(progress) => {
                if let Some(transfer) = &mut self.transfer {
                    transfer.progress = Some(progress);
                }
            }
            TransferEvent::Complete(result) => {
                let Some(transfer) = self.transfer.take() else {
                    return;
                };
                if self.mode == AppMode::Transferring {
                    self.mode = AppMode::Normal;
                }

                let result = match transfer.pending {
                    PendingTransfer::Paste(plan) => self.nav.finish_paste(&plan, result),
                    PendingTransfer::Drop { source } => {
                        if let Ok(JobOutcome::Drop(outcome)) = &result {
                            self.nav.finish_drop(&source, outcome);
                            self.drag_source = None;
                        }
                        result
                    }
                };

                self.status = Some(match result {
                    Ok(outcome) => StatusMessage::success(outcome.summary()),
                    Err(e) => {
                        tracing::warn!(source = %transfer.source.display(), error = %e, "transfer failed");
                        StatusMessage::error(&e)
                    }
                });
                self.reload_all();
            }
        }
    }

    /// The worker went away without reporting a result.
    fn transfer_lost(&mut self) {
        if let Some(transfer) = self.transfer.take() {
            tracing::error!(source = %transfer.source.display(), "transfer ended without a result");
            self.status = Some(StatusMessage::error(&FsError::Cancelled));
        }
        if self.mode == AppMode::Transferring {
            self.mode = AppMode::Normal;
        }
        self.reload_all();
    }

    /// Re-read one pane from disk.
    fn reload(&mut self, level: Level) {
        let pane = &mut self.panes[level.index()];
        if self.nav.level(level).is_empty() {
            pane.clear();
            return;
        }
        match self.nav.listing(level) {
            Ok(entries) => pane.set_entries(entries),
            Err(e) => {
                tracing::warn!(level = %level, error = %e, "listing failed");
                pane.set_error(e.to_string());
            }
        }
    }

    /// Drop vanished roots and re-read every pane.
    fn reload_all(&mut self) {
        self.nav.revalidate();
        for level in [Level::Top, Level::Middle, Level::Inner] {
            self.reload(level);
        }
        while self.nav.level(self.focus).is_empty() {
            match self.focus.prev() {
                Some(prev) => self.focus = prev,
                None => break,
            }
        }
        if self
            .drag_source
            .as_deref()
            .is_some_and(|p| std::fs::symlink_metadata(p).is_err())
        {
            self.drag_source = None;
        }
    }

    fn persist_settings(&self) {
        if let Some(path) = &self.settings_path
            && let Err(e) = self.settings.save_to(path)
        {
            tracing::warn!(path = %path.display(), error = %e, "could not save settings");
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = RenderContext {
            mode: self.mode,
            theme: &self.theme,
            focus: self.focus,
            panes: &self.panes,
            roots: [Level::Top, Level::Middle, Level::Inner].map(|l| self.nav.level(l).root()),
            clipboard: self.nav.clipboard().peek(),
            drag_source: self.drag_source.as_deref(),
            show_hidden: self.nav.show_hidden(),
            status: self.status.as_ref(),
            input: self.input.as_ref(),
            transfer: self.transfer.as_ref(),
        };
        render_app(&ctx, area, buf);
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(value: &str) -> PathBuf {
    let rest = match value.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(value),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(value),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tempfile::TempDir;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Orders/2024/jan.txt, Orders/invoice.pdf, Archive/, notes.txt
    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("Orders/2024")).unwrap();
        fs::write(root.join("Orders/2024/jan.txt"), "jan").unwrap();
        fs::write(root.join("Orders/invoice.pdf"), "pdf").unwrap();
        fs::create_dir(root.join("Archive")).unwrap();
        fs::write(root.join("notes.txt"), "notes").unwrap();
        temp
    }

    fn app(temp: &TempDir) -> App {
        let config = TuiConfig {
            drop_fallback: Some(temp.path().join("Archive")),
            ..TuiConfig::default()
        };
        App::with_settings(temp.path().to_path_buf(), config, UserSettings::default()).unwrap()
    }

    fn names(pane: &PaneState) -> Vec<&str> {
        pane.visible_entries().map(|e| e.name.as_str()).collect()
    }

    async fn finish_transfer(app: &mut App) {
        while let Some(transfer) = app.transfer.as_mut() {
            let event = transfer.rx.recv().await;
            match event {
                Some(event) => app.handle_transfer_event(event),
                None => app.transfer_lost(),
            }
        }
    }

    #[test]
    fn test_startup_lists_top_level() {
        let temp = fixture();
        let app = app(&temp);

        assert_eq!(names(&app.panes[0]), vec!["Archive", "Orders", "notes.txt"]);
        assert!(app.nav.level(Level::Middle).is_empty());
        assert_eq!(app.focus, Level::Top);
    }

    #[test]
    fn test_select_cascades_and_moves_focus() {
        let temp = fixture();
        let mut app = app(&temp);

        app.handle_key(key('j'));
        app.handle_key(key('l'));

        assert_eq!(app.focus, Level::Middle);
        assert_eq!(names(&app.panes[1]), vec!["2024", "invoice.pdf"]);

        app.handle_key(key('l'));
        assert_eq!(app.focus, Level::Inner);
        assert_eq!(names(&app.panes[2]), vec!["jan.txt"]);

        // Re-selecting at the top clears the inner pane.
        app.handle_key(key('h'));
        app.handle_key(key('h'));
        app.handle_key(key('k'));
        app.handle_key(key('l'));
        assert!(app.panes[2].visible_entries().next().is_none());
        assert!(app.nav.level(Level::Inner).is_empty());
    }

    #[test]
    fn test_selecting_file_at_top_does_nothing() {
        let temp = fixture();
        let mut app = app(&temp);

        app.handle_key(key('G'));
        app.handle_key(key('l'));

        assert_eq!(app.focus, Level::Top);
        assert!(app.nav.level(Level::Middle).is_empty());
    }

    #[test]
    fn test_filter_is_live_and_esc_restores() {
        let temp = fixture();
        let mut app = app(&temp);

        app.handle_key(key('/'));
        assert_eq!(app.mode, AppMode::Filter);
        app.handle_key(key('O'));
        app.handle_key(key('r'));
        assert_eq!(names(&app.panes[0]), vec!["Orders"]);

        app.handle_key(code(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.panes[0].visible_len(), 3);

        app.handle_key(key('/'));
        app.handle_key(key('t'));
        app.handle_key(code(KeyCode::Enter));
        assert_eq!(names(&app.panes[0]), vec!["notes.txt"]);
        assert_eq!(app.panes[0].filter().needle(), "t");
    }

    #[test]
    fn test_paste_without_clipboard_reports_error() {
        let temp = fixture();
        let mut app = app(&temp);

        app.handle_key(key('p'));

        assert_eq!(app.mode, AppMode::Normal);
        assert!(matches!(
            app.status.as_ref().map(|s| s.kind),
            Some(state::StatusKind::Error(_))
        ));
    }

    #[tokio::test]
    async fn test_copy_and_paste_flow() {
        let temp = fixture();
        let mut app = app(&temp);

        // Orders -> invoice.pdf
        app.handle_key(key('j'));
        app.handle_key(key('l'));
        app.handle_key(key('j'));
        app.handle_key(key('y'));
        assert!(app.nav.clipboard().holds(&temp.path().join("Orders/invoice.pdf")));

        // Paste into Archive via the prompt.
        app.handle_key(key('p'));
        assert_eq!(app.mode, AppMode::PastePrompt);
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        for c in temp.path().join("Archive").display().to_string().chars() {
            app.handle_key(key(c));
        }
        app.handle_key(code(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Transferring);

        finish_transfer(&mut app).await;

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(
            fs::read_to_string(temp.path().join("Archive/invoice.pdf")).unwrap(),
            "pdf"
        );
        assert!(temp.path().join("Orders/invoice.pdf").exists());
        assert!(app.nav.clipboard().is_empty());
    }

    #[test]
    fn test_paste_conflict_keeps_prompt_open() {
        let temp = fixture();
        let mut app = app(&temp);

        // Copy notes.txt and paste it back into the root it came from.
        app.handle_key(key('G'));
        app.handle_key(key('y'));
        app.handle_key(key('p'));
        app.handle_key(code(KeyCode::Enter));

        assert_eq!(app.mode, AppMode::PastePrompt);
        assert!(app.input.as_ref().and_then(|i| i.error()).is_some());
        assert!(app.transfer.is_none());
        assert!(!app.nav.clipboard().is_empty());
    }

    #[tokio::test]
    async fn test_drag_onto_directory_moves() {
        let temp = fixture();
        let mut app = app(&temp);

        app.handle_key(key('G'));
        app.handle_key(key('m'));
        assert!(app.drag_source.is_some());

        app.handle_key(key('g'));
        app.handle_key(key('D'));
        finish_transfer(&mut app).await;

        assert!(temp.path().join("Archive/notes.txt").exists());
        assert!(!temp.path().join("notes.txt").exists());
        assert!(app.drag_source.is_none());
        assert_eq!(names(&app.panes[0]), vec!["Archive", "Orders"]);
    }

    #[tokio::test]
    async fn test_moving_middle_root_clears_levels() {
        let temp = fixture();
        let mut app = app(&temp);

        // Open Orders/2024 in the inner pane.
        app.handle_key(key('j'));
        app.handle_key(key('l'));
        app.handle_key(key('l'));
        assert!(!app.nav.level(Level::Inner).is_empty());

        // Drag Orders onto Archive from the top pane.
        app.handle_key(key('h'));
        app.handle_key(key('h'));
        app.handle_key(key('m'));
        app.handle_key(key('k'));
        app.handle_key(key('D'));
        finish_transfer(&mut app).await;

        assert!(temp.path().join("Archive/Orders/2024/jan.txt").exists());
        assert!(app.nav.level(Level::Middle).is_empty());
        assert!(app.nav.level(Level::Inner).is_empty());
        assert_eq!(app.focus, Level::Top);
    }

    #[test]
    fn test_terminal_opener_is_queued_not_run() {
        let temp = fixture();
        let config = TuiConfig {
            opener: Some("tripane-test-pager --plain".to_string()),
            ..TuiConfig::default()
        };
        let mut app =
            App::with_settings(temp.path().to_path_buf(), config, UserSettings::default())
                .unwrap();

        app.handle_key(key('G'));
        app.handle_key(code(KeyCode::Enter));

        let (path, cmd) = app.pending_suspend.as_ref().unwrap();
        assert_eq!(path, &temp.path().join("notes.txt"));
        assert_eq!(cmd.get_program(), "tripane-test-pager");
        assert_eq!(cmd.get_args().count(), 2);
        assert!(app.status.is_none());

        let (path, _) = app.pending_suspend.take().unwrap();
        app.finish_foreground(&path, Ok(ExitStatus::default()));
        assert_eq!(app.status.as_ref().unwrap().kind, state::StatusKind::Info);

        app.finish_foreground(
            &path,
            Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
        );
        assert!(matches!(
            app.status.as_ref().unwrap().kind,
            state::StatusKind::Error(_)
        ));
    }

    #[test]
    fn test_escape_releases_drag() {
        let temp = fixture();
        let mut app = app(&temp);

        app.handle_key(key('m'));
        assert!(app.drag_source.is_some());
        app.handle_key(code(KeyCode::Esc));
        assert!(app.drag_source.is_none());
    }

    #[test]
    fn test_toggle_hidden_relists() {
        let temp = fixture();
        fs::write(temp.path().join(".secret"), "").unwrap();
        let mut app = app(&temp);
        assert_eq!(app.panes[0].total_len(), 3);

        app.handle_key(key('.'));

        assert_eq!(app.panes[0].total_len(), 4);
        assert!(app.settings.show_hidden);
    }

    #[test]
    fn test_render_shows_pane_titles() {
        let temp = fixture();
        let app = app(&temp);
        let area = Rect::new(0, 0, 120, 20);
        let mut buf = Buffer::empty(area);

        (&app).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Directories"));
        assert!(text.contains("Subdirectories"));
        assert!(text.contains("Orders"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_home("~user"), PathBuf::from("~user"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/Desktop"), home.join("Desktop"));
        }
    }
}
