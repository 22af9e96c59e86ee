//! Windows console backend
//!
//! Talks to the console screen buffer behind the standard output handle.
//! Console coordinates are already zero-based, so positions pass through
//! unchanged.

use tracing::{debug, warn};

use windows::core::PWSTR;
use windows::Win32::Foundation::{LocalFree, HANDLE, HLOCAL};
use windows::Win32::System::Console::{
    GetConsoleScreenBufferInfo, GetStdHandle, SetConsoleCursorPosition, SetConsoleWindowInfo,
    CONSOLE_SCREEN_BUFFER_INFO, COORD, SMALL_RECT, STD_OUTPUT_HANDLE,
};
use windows::Win32::System::Diagnostics::Debug::{
    FormatMessageW, FORMAT_MESSAGE_ALLOCATE_BUFFER, FORMAT_MESSAGE_FROM_SYSTEM,
    FORMAT_MESSAGE_IGNORE_INSERTS,
};

use crate::error::{self, Error, Result};

use super::backend::{Backend, Platform};
use super::geometry::Position;

/// Backend for the Windows console
#[derive(Debug)]
pub struct ConsoleBackend {
    stdout: HANDLE,
}

// Safety: the handle is only read after open and the console API accepts
// calls from any thread
unsafe impl Send for ConsoleBackend {}
unsafe impl Sync for ConsoleBackend {}

impl ConsoleBackend {
    /// Resolve the standard output handle
    pub fn open() -> Result<Self> {
        let stdout = unsafe { GetStdHandle(STD_OUTPUT_HANDLE) }.map_err(os_error)?;
        Ok(Self { stdout })
    }
}

impl Backend for ConsoleBackend {
    fn platform(&self) -> Platform {
        Platform::Console
    }

    fn cursor_position(&self) -> Result<Position> {
        let mut info = CONSOLE_SCREEN_BUFFER_INFO::default();
        unsafe { GetConsoleScreenBufferInfo(self.stdout, &mut info) }.map_err(os_error)?;

        let cursor = info.dwCursorPosition;
        Ok(Position::new(cursor.X as u16, cursor.Y as u16))
    }

    fn set_cursor_position(&self, x: u16, y: u16) -> Result<()> {
        let coord = COORD {
            X: x as i16,
            Y: y as i16,
        };
        unsafe { SetConsoleCursorPosition(self.stdout, coord) }.map_err(os_error)?;

        debug!("Move cursor to {},{}", x, y);
        Ok(())
    }

    fn set_terminal_size(&self, columns: u16, lines: u16) -> Result<()> {
        let rect = SMALL_RECT {
            Left: 0,
            Top: 0,
            Right: columns as i16,
            Bottom: lines as i16,
        };
        unsafe { SetConsoleWindowInfo(self.stdout, true, &rect) }.map_err(os_error)?;

        debug!("Resized to {}x{}", columns, lines);
        Ok(())
    }
}

/// Build an [`Error::Os`] from the last error code windows-rs captured at
/// the failing call
fn os_error(err: windows::core::Error) -> Error {
    let code = error::win32_code(err.code().0);
    let message = error::translate_code(code, format_message);
    warn!("Console call failed (code {}): {:?}", code, message);
    Error::Os(message)
}

/// System description of an error code; `None` if the system has none
fn format_message(code: u32) -> Option<String> {
    let mut buffer = PWSTR::null();
    let len = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_ALLOCATE_BUFFER | FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            None,
            code,
            0,
            // With ALLOCATE_BUFFER the system writes the buffer address here
            PWSTR(&mut buffer.0 as *mut *mut u16 as *mut u16),
            0,
            None,
        )
    };
    if len == 0 || buffer.is_null() {
        return None;
    }

    let message = unsafe { buffer.to_string() }.ok();
    unsafe {
        let _ = LocalFree(HLOCAL(buffer.0 as *mut _));
    }
    message
}
