//! Backend interface and platform selection.

use tracing::info;

use crate::error::{Error, Result};

use super::geometry::{Limit, Position, Size};

/// Host family a backend drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows console API
    Console,
    /// ANSI escape sequences plus the terminal helper
    Posix,
}

impl Platform {
    /// Family of the host this binary was built for
    pub const fn host() -> Option<Platform> {
        if cfg!(windows) {
            Some(Platform::Console)
        } else if cfg!(unix) {
            Some(Platform::Posix)
        } else {
            None
        }
    }

    pub const fn limit(self) -> Limit {
        match self {
            Platform::Console => Limit::Console,
            Platform::Posix => Limit::Terminal,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Platform::Console => "windows-console",
            Platform::Posix => "posix",
        }
    }
}

/// Native side of every operation.
///
/// Arguments reaching a backend are already validated against
/// [`Backend::limit`].
pub trait Backend: Send + Sync {
    fn platform(&self) -> Platform;

    fn limit(&self) -> Limit {
        self.platform().limit()
    }

    fn cursor_position(&self) -> Result<Position>;

    fn set_cursor_position(&self, x: u16, y: u16) -> Result<()>;

    /// Current size as reported by the host's terminal-size query.
    ///
    /// On Unix crossterm asks the controlling terminal (`/dev/tty`) first and
    /// only then stdout, so a redirected stdout still reports the terminal's
    /// size.
    fn terminal_size(&self) -> Result<Size> {
        let (columns, lines) =
            crossterm::terminal::size().map_err(|e| Error::Os(Some(e.to_string())))?;
        Ok(Size::new(columns, lines))
    }

    fn set_terminal_size(&self, columns: u16, lines: u16) -> Result<()>;
}

/// Open the backend for the host.
///
/// Runs once per process; hosts that are neither Windows nor Unix fail here
/// instead of on the first call.
pub fn open() -> Result<Box<dyn Backend>> {
    let backend = open_host()?;
    info!("Backend: {}", backend.platform().name());
    Ok(backend)
}

#[cfg(windows)]
fn open_host() -> Result<Box<dyn Backend>> {
    Ok(Box::new(super::console::ConsoleBackend::open()?))
}

#[cfg(unix)]
fn open_host() -> Result<Box<dyn Backend>> {
    Ok(Box::new(super::posix::PosixBackend::open()?))
}

#[cfg(not(any(windows, unix)))]
fn open_host() -> Result<Box<dyn Backend>> {
    Err(Error::Unsupported {
        os: std::env::consts::OS,
    })
}
