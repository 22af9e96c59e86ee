//! POSIX backend
//!
//! Cursor control goes through ANSI escape sequences written to stdout. The
//! two things escape sequences cannot do on their own, reading the terminal's
//! position report and resizing the terminal, are delegated to a [`Helper`].

use std::io::{self, Read, Write};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::backend::{Backend, Platform};
use super::geometry::Position;
use super::reply;

/// Status string returned by [`Helper::set_terminal_size`] on success
pub const RESIZE_OK: &str = "none";

/// Raw answer from [`Helper::get_cursor_position`]
#[derive(Debug, Clone)]
pub struct CursorReply {
    /// Zero on failure; `raw` then holds an error message
    pub status: i32,
    /// Terminal reply bytes, or the error message
    pub raw: Vec<u8>,
}

impl CursorReply {
    pub fn success(raw: impl Into<Vec<u8>>) -> Self {
        Self { status: 1, raw: raw.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { status: 0, raw: message.into().into_bytes() }
    }
}

/// Terminal primitives that escape sequences alone cannot provide
pub trait Helper: Send + Sync {
    /// Ask the terminal for the cursor position and return its raw reply
    fn get_cursor_position(&self) -> CursorReply;

    /// Resize the terminal; returns [`RESIZE_OK`] or an error description
    fn set_terminal_size(&self, columns: u16, lines: u16) -> String;
}

/// Helper driving the process's own terminal through stdin/stdout
#[derive(Debug)]
pub struct TtyHelper {
    _private: (),
}

impl TtyHelper {
    /// Check that stdin is an open descriptor
    pub fn open() -> Result<Self> {
        // Safety: F_GETFD only inspects the descriptor table
        let flags = unsafe { libc::fcntl(libc::STDIN_FILENO, libc::F_GETFD) };
        if flags == -1 {
            return Err(Error::HelperNotFound(format!("stdin: {}", errno_message())));
        }
        Ok(Self { _private: () })
    }

    fn read_report(&self) -> io::Result<Vec<u8>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(reply::QUERY)?;
        stdout.flush()?;
        drop(stdout);

        let mut stdin = io::stdin().lock();
        let mut raw = Vec::with_capacity(16);
        let mut byte = [0u8; 1];
        loop {
            // Blocks until the terminal answers
            if stdin.read(&mut byte)? == 0 {
                break;
            }
            raw.push(byte[0]);
            if byte[0] == b'R' {
                break;
            }
        }
        Ok(raw)
    }
}

impl Helper for TtyHelper {
    fn get_cursor_position(&self) -> CursorReply {
        // Safety: isatty has no preconditions
        if unsafe { libc::isatty(libc::STDIN_FILENO) } != 1 {
            return CursorReply::failure(errno_message());
        }

        let was_raw = crossterm::terminal::is_raw_mode_enabled().unwrap_or(false);
        if !was_raw {
            if let Err(e) = crossterm::terminal::enable_raw_mode() {
                return CursorReply::failure(io_message(&e));
            }
        }

        let result = self.read_report();

        if !was_raw {
            let _ = crossterm::terminal::disable_raw_mode();
        }

        match result {
            Ok(raw) => CursorReply::success(raw),
            Err(e) => CursorReply::failure(io_message(&e)),
        }
    }

    fn set_terminal_size(&self, columns: u16, lines: u16) -> String {
        let size = libc::winsize {
            ws_row: lines,
            ws_col: columns,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        // Safety: TIOCSWINSZ reads a winsize that outlives the call
        let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCSWINSZ, &size as *const libc::winsize) };
        if rc != -1 {
            return RESIZE_OK.to_string();
        }
        errno_message()
    }
}

fn errno_message() -> String {
    io_message(&io::Error::last_os_error())
}

/// Format as `[Errno N] description`
fn io_message(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => {
            let text = err.to_string();
            let description = text
                .strip_suffix(&format!(" (os error {})", code))
                .unwrap_or(&text);
            format!("[Errno {}] {}", code, description)
        }
        None => err.to_string(),
    }
}

/// Backend for Unix hosts
pub struct PosixBackend {
    helper: Box<dyn Helper>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl PosixBackend {
    /// Backend on the process's terminal
    pub fn open() -> Result<Self> {
        let helper = TtyHelper::open()?;
        Ok(Self::with_parts(Box::new(helper), Box::new(io::stdout())))
    }

    /// Backend on an arbitrary helper and output stream
    pub fn with_parts(helper: Box<dyn Helper>, out: Box<dyn Write + Send>) -> Self {
        Self {
            helper,
            out: Mutex::new(out),
        }
    }

    fn emit(&self, sequence: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = out.write_all(sequence.as_bytes()).and_then(|_| out.flush()) {
            warn!("Escape sequence write failed: {}", e);
        }
    }
}

impl Backend for PosixBackend {
    fn platform(&self) -> Platform {
        Platform::Posix
    }

    fn cursor_position(&self) -> Result<Position> {
        let reply = self.helper.get_cursor_position();
        if reply.status == 0 {
            let message = String::from_utf8_lossy(&reply.raw).into_owned();
            warn!("Cursor query failed: {}", message);
            return Err(Error::Os(Some(message)));
        }

        match reply::parse_report(&reply.raw) {
            Some(pos) => Ok(pos),
            None => {
                warn!("Unrecognized cursor report {:?}, using origin", reply.raw);
                Ok(Position::default())
            }
        }
    }

    fn set_cursor_position(&self, x: u16, y: u16) -> Result<()> {
        // Fails early on terminals that cannot report a position
        self.cursor_position()?;

        debug!("Move cursor to {},{}", x, y);
        self.emit(&reply::move_to(x, y));
        Ok(())
    }

    fn set_terminal_size(&self, columns: u16, lines: u16) -> Result<()> {
        // Some emulators ignore the line count without reporting an error
        let status = self.helper.set_terminal_size(columns, lines);
        if status != RESIZE_OK {
            warn!("Resize to {}x{} failed: {}", columns, lines, status);
            return Err(Error::Os(Some(status)));
        }
        debug!("Resized to {}x{}", columns, lines);
        Ok(())
    }
}

impl std::fmt::Debug for PosixBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosixBackend").finish_non_exhaustive()
    }
}
