//! gotoxy - cursor position and terminal size control
//!
//! One small function set over two incompatible native facilities: the
//! Windows console API and POSIX terminals driven by ANSI escape sequences.
//!
//! # Operations
//!
//! | Function | Effect |
//! |----------|--------|
//! | [`get_cursor_position`] | zero-based `(x, y)` of the cursor |
//! | [`set_cursor_position`] | move the cursor |
//! | [`get_terminal_size`] | `(columns, lines)` of the terminal |
//! | [`set_terminal_size`] | resize the terminal buffer |
//!
//! Arguments are checked before any native call. Negative values and values
//! above 32767 (Windows console) or 65535 (elsewhere) are rejected with
//! [`Error::ArgumentRange`].
//!
//! ```no_run
//! gotoxy::set_cursor_position(5, 5)?;
//! let (x, y) = gotoxy::get_cursor_position()?;
//! assert_eq!((x, y), (5, 5));
//! # Ok::<(), gotoxy::Error>(())
//! ```
//!
//! # Platform notes
//!
//! On POSIX hosts the cursor position is read by asking the terminal for a
//! position report. Terminals that answer with something else yield `(0, 0)`
//! instead of an error. Resizing may leave the line count unchanged on
//! emulators that do not support it.
//!
//! The backend is opened on the first call and held for the rest of the
//! process. Calls block until the console or terminal answers; callers on
//! several threads must serialize access themselves.

pub mod config;
pub mod core;
pub mod error;
pub mod terminal;

pub use crate::core::backend::{Backend, Platform};
pub use crate::core::geometry::{Limit, Position, Size};
pub use crate::error::{Error, Result};
pub use crate::terminal::Terminal;

/// Version string from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current cursor position as zero-based `(x, y)`
pub fn get_cursor_position() -> Result<(u16, u16)> {
    Ok(Terminal::global()?.cursor_position()?.into())
}

/// Move the cursor to zero-based `(x, y)`
pub fn set_cursor_position(x: i64, y: i64) -> Result<()> {
    Terminal::global()?.set_cursor_position(x, y)
}

/// Current terminal size as `(columns, lines)`
pub fn get_terminal_size() -> Result<(u16, u16)> {
    Ok(Terminal::global()?.terminal_size()?.into())
}

/// Resize the terminal buffer
pub fn set_terminal_size(columns: i64, lines: i64) -> Result<()> {
    Terminal::global()?.set_terminal_size(columns, lines)
}
