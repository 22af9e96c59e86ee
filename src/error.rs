//! Error types shared by every backend.
//!
//! Validation failures are raised before any native call is made. Native and
//! helper failures are surfaced as [`Error::Os`] with whatever message the
//! platform produced, which may be absent on the console path when the
//! system cannot format the error code.

use thiserror::Error;

/// Message reported when a native call fails without setting an error code.
pub const UNKNOWN_ERROR: &str = "Unknown error.";

#[derive(Error, Debug)]
pub enum Error {
    /// An argument could not be read as an integer
    #[error("Arguments must be integers (got {value:?}).")]
    ArgumentType { value: String },

    /// An argument is negative or above the platform bound
    #[error("{}", range_message(.value, .limit))]
    ArgumentRange { value: i64, limit: u16 },

    /// A native console call or terminal helper primitive failed
    #[error("{}", .0.as_deref().unwrap_or("OS error with no message"))]
    Os(Option<String>),

    /// No backend exists for the host operating system
    #[error("Unsupported platform: {os}")]
    Unsupported { os: &'static str },

    /// The POSIX terminal helper could not be set up
    #[error("Terminal helper is not available: {0}")]
    HelperNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Native or helper message carried by an [`Error::Os`]
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Os(message) => message.as_deref(),
            _ => None,
        }
    }

    /// True for the two validation kinds
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Error::ArgumentType { .. } | Error::ArgumentRange { .. })
    }
}

fn range_message(value: &i64, limit: &u16) -> String {
    if *value < 0 {
        "Arguments must be positive integers.".to_string()
    } else {
        format!("Arguments must have a value no greater than {}.", limit)
    }
}

/// Turn a last-error code into a message.
///
/// Code zero means the call failed without recording a reason. Any other code
/// is handed to `format`, and a formatting failure leaves the message absent.
pub fn translate_code<F>(code: u32, format: F) -> Option<String>
where
    F: FnOnce(u32) -> Option<String>,
{
    if code == 0 {
        return Some(UNKNOWN_ERROR.to_string());
    }
    format(code).map(|message| message.trim().to_string())
}

/// Win32 error code wrapped in an `HRESULT_FROM_WIN32` value.
///
/// Values outside the Win32 facility are returned as their raw bits; zero
/// stays zero.
pub fn win32_code(hresult: i32) -> u32 {
    let bits = hresult as u32;
    if bits & 0xFFFF_0000 == 0x8007_0000 {
        bits & 0xFFFF
    } else {
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_code_is_unknown_error() {
        let message = translate_code(0, |_| panic!("formatter must not run"));
        assert_eq!(message.as_deref(), Some("Unknown error."));

        let err = Error::Os(message);
        assert_eq!(err.message(), Some("Unknown error."));
        assert_eq!(err.to_string(), "Unknown error.");
    }

    #[test]
    fn test_formatted_code_is_trimmed() {
        let message = translate_code(6, |code| Some(format!("The handle is invalid ({}).\r\n", code)));
        assert_eq!(message.as_deref(), Some("The handle is invalid (6)."));
    }

    #[test]
    fn test_format_failure_leaves_message_absent() {
        let message = translate_code(5, |_| None);
        assert_eq!(message, None);

        let err = Error::Os(message);
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "OS error with no message");
    }

    #[test]
    fn test_win32_code_from_hresult() {
        // HRESULT_FROM_WIN32(ERROR_INVALID_HANDLE)
        assert_eq!(win32_code(0x8007_0006_u32 as i32), 6);
        // failure captured with no last error set
        assert_eq!(win32_code(0), 0);
        assert_eq!(
            translate_code(win32_code(0), |_| None).as_deref(),
            Some("Unknown error.")
        );
        // E_FAIL is not a Win32 facility code
        assert_eq!(win32_code(0x8000_4005_u32 as i32), 0x8000_4005);
    }

    #[test]
    fn test_range_messages() {
        let negative = Error::ArgumentRange { value: -1, limit: 65535 };
        assert_eq!(negative.to_string(), "Arguments must be positive integers.");

        let too_big = Error::ArgumentRange { value: 40000, limit: 32767 };
        assert_eq!(too_big.to_string(), "Arguments must have a value no greater than 32767.");
        assert!(too_big.is_argument_error());
    }
}
