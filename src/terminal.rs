//! Public facade: validation in front of the active backend.

use std::sync::OnceLock;

use tracing::debug;

use crate::core::backend::{self, Backend, Platform};
use crate::core::geometry::{Position, Size};
use crate::core::validate;
use crate::error::Result;

/// Cursor and size control over one backend
pub struct Terminal {
    backend: Box<dyn Backend>,
}

/// Process-wide terminal, opened on first use
static TERMINAL: OnceLock<Terminal> = OnceLock::new();

impl Terminal {
    /// Open the backend for the host
    pub fn open() -> Result<Self> {
        Ok(Self::with_backend(backend::open()?))
    }

    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// The process-wide terminal.
    ///
    /// The first successful call opens the backend; it is then held until the
    /// process exits. A failed open is returned to the caller and retried on
    /// the next call.
    pub fn global() -> Result<&'static Terminal> {
        if let Some(terminal) = TERMINAL.get() {
            return Ok(terminal);
        }
        let terminal = Terminal::open()?;
        Ok(TERMINAL.get_or_init(|| terminal))
    }

    pub fn platform(&self) -> Platform {
        self.backend.platform()
    }

    /// Zero-based cursor position
    pub fn cursor_position(&self) -> Result<Position> {
        let pos = self.backend.cursor_position()?;
        debug!("Cursor position: {}", pos);
        Ok(pos)
    }

    /// Move the cursor to a zero-based column and row
    pub fn set_cursor_position(&self, x: i64, y: i64) -> Result<()> {
        let (x, y) = validate::check_pair(x, y, self.backend.limit())?;
        self.backend.set_cursor_position(x, y)
    }

    /// [`Terminal::set_cursor_position`] with textual arguments
    pub fn set_cursor_position_str(&self, x: &str, y: &str) -> Result<()> {
        let (x, y) = validate::parse_pair(x, y, self.backend.limit())?;
        self.backend.set_cursor_position(x, y)
    }

    pub fn terminal_size(&self) -> Result<Size> {
        let size = self.backend.terminal_size()?;
        debug!("Terminal size: {}", size);
        Ok(size)
    }

    /// Resize the terminal.
    ///
    /// On POSIX hosts the line count may be ignored by the emulator without
    /// any error being reported.
    pub fn set_terminal_size(&self, columns: i64, lines: i64) -> Result<()> {
        let (columns, lines) = validate::check_pair(columns, lines, self.backend.limit())?;
        self.backend.set_terminal_size(columns, lines)
    }

    /// [`Terminal::set_terminal_size`] with textual arguments
    pub fn set_terminal_size_str(&self, columns: &str, lines: &str) -> Result<()> {
        let (columns, lines) = validate::parse_pair(columns, lines, self.backend.limit())?;
        self.backend.set_terminal_size(columns, lines)
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("platform", &self.platform())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Backend that only counts native calls
    struct StubBackend {
        platform: Platform,
        calls: Arc<AtomicUsize>,
        size: Size,
    }

    impl StubBackend {
        fn new(platform: Platform) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let backend = Self {
                platform,
                calls: calls.clone(),
                size: Size::new(80, 24),
            };
            (backend, calls)
        }
    }

    impl Backend for StubBackend {
        fn platform(&self) -> Platform {
            self.platform
        }

        fn cursor_position(&self) -> Result<Position> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Position::default())
        }

        fn set_cursor_position(&self, _x: u16, _y: u16) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn terminal_size(&self) -> Result<Size> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.size)
        }

        fn set_terminal_size(&self, _columns: u16, _lines: u16) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn stub(platform: Platform) -> (Terminal, Arc<AtomicUsize>) {
        let (backend, calls) = StubBackend::new(platform);
        (Terminal::with_backend(Box::new(backend)), calls)
    }

    #[test]
    fn test_non_integer_args_never_reach_backend() {
        let (term, calls) = stub(Platform::Posix);

        for (x, y) in [("1.5", "2"), ("3", "abc"), ("", "0")] {
            let err = term.set_cursor_position_str(x, y).unwrap_err();
            assert!(matches!(err, Error::ArgumentType { .. }));

            let err = term.set_terminal_size_str(x, y).unwrap_err();
            assert!(matches!(err, Error::ArgumentType { .. }));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_negative_args_never_reach_backend() {
        let (term, calls) = stub(Platform::Console);

        assert!(matches!(
            term.set_cursor_position(-1, 0),
            Err(Error::ArgumentRange { value: -1, .. })
        ));
        assert!(matches!(
            term.set_cursor_position(0, -1),
            Err(Error::ArgumentRange { value: -1, .. })
        ));
        assert!(matches!(
            term.set_terminal_size(-80, 24),
            Err(Error::ArgumentRange { .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_console_bound_is_32767() {
        let (term, calls) = stub(Platform::Console);

        term.set_cursor_position(32767, 32767).unwrap();
        assert!(matches!(
            term.set_cursor_position(32768, 0),
            Err(Error::ArgumentRange { limit: 32767, .. })
        ));
        assert!(matches!(
            term.set_terminal_size(0, 40000),
            Err(Error::ArgumentRange { limit: 32767, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_posix_bound_is_65535() {
        let (term, calls) = stub(Platform::Posix);

        term.set_cursor_position(40000, 65535).unwrap();
        term.set_terminal_size(65535, 1).unwrap();
        assert!(matches!(
            term.set_cursor_position(65536, 0),
            Err(Error::ArgumentRange { limit: 65535, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_terminal_size_passes_through() {
        let (term, _) = stub(Platform::Posix);
        assert_eq!(term.terminal_size().unwrap(), Size::new(80, 24));
    }

    #[cfg(unix)]
    #[test]
    fn test_round_trip_on_simulated_terminal() {
        use crate::core::posix::sim::SimTerminal;

        let sim = SimTerminal::new();
        let term = Terminal::with_backend(Box::new(sim.backend()));

        term.set_cursor_position(5, 5).unwrap();
        assert_eq!(term.cursor_position().unwrap(), Position::new(5, 5));

        term.set_cursor_position_str("12", "0").unwrap();
        assert_eq!(term.cursor_position().unwrap(), Position::new(12, 0));
    }

    #[cfg(unix)]
    #[test]
    fn test_resize_error_surfaces_helper_text() {
        use crate::core::posix::sim::SimTerminal;

        let sim = SimTerminal::new();
        sim.state().resize_status = Some("resize refused".to_string());
        let term = Terminal::with_backend(Box::new(sim.backend()));

        let err = term.set_terminal_size(120, 50).unwrap_err();
        assert!(matches!(err, Error::Os(_)));
        assert_eq!(err.message(), Some("resize refused"));
    }
}
