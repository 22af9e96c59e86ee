//! Cursor position report parser
//!
//! Reads the terminal's answer to `ESC [ 6 n`, which has the form
//! `ESC [ row ; col R` with one-based values.

use super::geometry::Position;

/// Cursor position query sent to the terminal
pub const QUERY: &[u8] = b"\x1b[6n";

#[derive(Clone, Copy, Default, PartialEq, Debug)]
enum ReplyState {
    #[default]
    Ground,
    Escape,
    Row,
    Col,
}

/// Byte-at-a-time parser for a single report
#[derive(Debug, Default)]
pub struct ReplyParser {
    state: ReplyState,
    row: Option<u32>,
    col: Option<u32>,
}

/// Result of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feed {
    /// Need more bytes
    Pending,
    /// Report complete: one-based (row, col)
    Done(u32, u32),
    /// Not a cursor position report
    Mismatch,
}

impl ReplyParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, byte: u8) -> Feed {
        match (self.state, byte) {
            (ReplyState::Ground, 0x1B) => {
                self.state = ReplyState::Escape;
                Feed::Pending
            }
            (ReplyState::Escape, b'[') => {
                self.state = ReplyState::Row;
                Feed::Pending
            }
            (ReplyState::Row, b'0'..=b'9') => {
                self.row = Some(push_digit(self.row, byte));
                Feed::Pending
            }
            (ReplyState::Row, b';') if self.row.is_some() => {
                self.state = ReplyState::Col;
                Feed::Pending
            }
            (ReplyState::Col, b'0'..=b'9') => {
                self.col = Some(push_digit(self.col, byte));
                Feed::Pending
            }
            (ReplyState::Col, b'R') => match (self.row, self.col) {
                (Some(row), Some(col)) => Feed::Done(row, col),
                _ => Feed::Mismatch,
            },
            _ => Feed::Mismatch,
        }
    }
}

fn push_digit(acc: Option<u32>, byte: u8) -> u32 {
    acc.unwrap_or(0)
        .saturating_mul(10)
        .saturating_add(u32::from(byte - b'0'))
}

/// Parse a raw report into a zero-based position.
///
/// The report must start at the first byte; anything after the final `R` is
/// ignored. Returns `None` when the bytes are not a report or a value does
/// not fit a terminal coordinate.
pub fn parse_report(raw: &[u8]) -> Option<Position> {
    let mut parser = ReplyParser::new();
    for &byte in raw {
        match parser.feed(byte) {
            Feed::Pending => continue,
            Feed::Mismatch => return None,
            Feed::Done(row, col) => {
                let x = u16::try_from(col.saturating_sub(1)).ok()?;
                let y = u16::try_from(row.saturating_sub(1)).ok()?;
                return Some(Position::new(x, y));
            }
        }
    }
    None
}

/// Escape sequence moving the cursor to a zero-based position
pub fn move_to(x: u16, y: u16) -> String {
    format!("\x1b[{};{}f", u32::from(y) + 1, u32::from(x) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_is_zero_based() {
        assert_eq!(parse_report(b"\x1b[1;1R"), Some(Position::new(0, 0)));
        // row 5, col 10 -> x 9, y 4
        assert_eq!(parse_report(b"\x1b[5;10R"), Some(Position::new(9, 4)));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        assert_eq!(parse_report(b"\x1b[3;4Rxyz"), Some(Position::new(3, 2)));
    }

    #[test]
    fn test_mismatches() {
        let cases: [&[u8]; 8] = [
            b"",
            b"garbage",
            b"x\x1b[5;5R",
            b"\x1b[5;5",
            b"\x1b[;5R",
            b"\x1b[5;R",
            b"\x1b[5R",
            b"\x1b[?5;5R",
        ];
        for raw in cases {
            assert_eq!(parse_report(raw), None, "{:?}", raw);
        }
    }

    #[test]
    fn test_oversized_value_is_mismatch() {
        assert_eq!(parse_report(b"\x1b[70000;1R"), None);
        assert_eq!(parse_report(b"\x1b[1;65536R"), Some(Position::new(65535, 0)));
    }

    #[test]
    fn test_move_to_is_one_based() {
        assert_eq!(move_to(0, 0), "\x1b[1;1f");
        assert_eq!(move_to(9, 4), "\x1b[5;10f");
        assert_eq!(move_to(65535, 65535), "\x1b[65536;65536f");
    }
}
