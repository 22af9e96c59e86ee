//! Platform layer.
//!
//! This module contains everything below the public facade:
//!
//! - **geometry**: `Position`, `Size` and the per-backend coordinate bound
//! - **validate**: argument checks that run before any native call
//! - **backend**: the `Backend` trait and host selection
//! - **reply**: parser for the terminal's cursor position report
//! - **console**: Windows console API backend
//! - **posix**: ANSI escape sequence backend with its terminal helper
//!
//! # Architecture
//!
//! ```text
//! Terminal
//! ├── validate (type + range checks)
//! └── Box<dyn Backend>
//!     ├── ConsoleBackend (Windows: screen buffer API, error formatting)
//!     └── PosixBackend   (Unix: escape sequences + Helper)
//!         └── TtyHelper  (raw mode position query, TIOCSWINSZ resize)
//! ```

pub mod backend;
pub mod geometry;
pub mod reply;
pub mod validate;

#[cfg(windows)]
pub mod console;
#[cfg(unix)]
pub mod posix;
