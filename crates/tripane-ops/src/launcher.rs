//! Opening paths with the host's default application.
//!
//! The platform handlers go through the `open` crate. A configured opener
//! command runs in the foreground with the caller's terminal, so editors and
//! pagers work. Callers that own the terminal take the command from
//! [`Launcher::foreground_command`] and run it themselves.

use std::path::Path;
use std::process::Command;

use tripane_core::{FsError, FsResult, absolutize};

/// Opens a path with an external handler.
pub trait Launcher: Send + Sync {
    /// Ask the handler to open `path`.
    fn open(&self, path: &Path) -> FsResult<()>;

    /// The command to run with the terminal handed over, when the handler
    /// needs one. `None` means [`open`](Self::open) can be called directly.
    fn foreground_command(&self, path: &Path) -> FsResult<Option<Command>> {
        let _ = path;
        Ok(None)
    }

    /// Short name for logs and status messages.
    fn name(&self) -> &str;
}

/// Platform opener, selected once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemLauncher {
    /// The Windows shell association.
    Windows,
    /// `open <path>`
    MacOs,
    /// `xdg-open <path>` or the first desktop handler found.
    Posix,
    /// A user-configured command; the path is appended as the last argument.
    Custom(String),
}

impl SystemLauncher {
    /// The launcher for the platform this binary was built for.
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Posix
        }
    }

    /// Use `opener` when configured, else the platform launcher.
    pub fn from_config(opener: Option<&str>) -> Self {
        match opener.map(str::trim) {
            Some(cmd) if !cmd.is_empty() => Self::Custom(cmd.to_string()),
            _ => Self::detect(),
        }
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::detect()
    }
}

impl Launcher for SystemLauncher {
    fn open(&self, path: &Path) -> FsResult<()> {
        let path = absolutize(path);

        if let Some(mut cmd) = self.foreground_command(&path)? {
            return match cmd.status() {
                Ok(status) if status.success() => {
                    tracing::debug!(path = %path.display(), launcher = self.name(), "opened");
                    Ok(())
                }
                Ok(status) => Err(FsError::launch(
                    &path,
                    format!("{} exited with {status}", self.name()),
                )),
                Err(e) => Err(FsError::launch(
                    &path,
                    format!("could not run {}: {e}", self.name()),
                )),
            };
        }

        open::that(&path).map_err(|e| FsError::launch(&path, e.to_string()))?;
        tracing::debug!(path = %path.display(), launcher = self.name(), "opened");
        Ok(())
    }

    fn foreground_command(&self, path: &Path) -> FsResult<Option<Command>> {
        let Self::Custom(line) = self else {
            return Ok(None);
        };

        let mut parts = line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| FsError::launch(path, "opener command is empty"))?;
        let mut cmd = Command::new(program);
        cmd.args(parts).arg(absolutize(path));
        Ok(Some(cmd))
    }

    fn name(&self) -> &str {
        match self {
            Self::Windows => "start",
            Self::MacOs => "open",
            Self::Posix => "xdg-open",
            Self::Custom(line) => line.split_whitespace().next().unwrap_or("opener"),
        }
    }
}
