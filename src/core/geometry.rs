//! Cursor positions, terminal sizes and the coordinate bounds of each backend.

use std::fmt;

/// Zero-based cursor location (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl From<(u16, u16)> for Position {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (u16, u16) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// Terminal surface dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub columns: u16,
    pub lines: u16,
}

impl Size {
    pub const fn new(columns: u16, lines: u16) -> Self {
        Self { columns, lines }
    }
}

impl From<(u16, u16)> for Size {
    fn from((columns, lines): (u16, u16)) -> Self {
        Self { columns, lines }
    }
}

impl From<Size> for (u16, u16) {
    fn from(size: Size) -> Self {
        (size.columns, size.lines)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.columns, self.lines)
    }
}

/// Largest coordinate a backend accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Windows console API (`COORD` and `SMALL_RECT` hold signed 16-bit values)
    Console,
    /// Everything else
    Terminal,
}

impl Limit {
    pub const fn max(self) -> u16 {
        match self {
            Limit::Console => 32767,
            Limit::Terminal => 65535,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits() {
        assert_eq!(Limit::Console.max(), 32767);
        assert_eq!(Limit::Terminal.max(), u16::MAX);
    }

    #[test]
    fn test_tuple_conversions() {
        let pos = Position::from((3, 7));
        assert_eq!(pos, Position::new(3, 7));
        assert_eq!(<(u16, u16)>::from(pos), (3, 7));

        let size: (u16, u16) = Size::new(80, 24).into();
        assert_eq!(size, (80, 24));
        assert_eq!(Size::new(80, 24).to_string(), "80 24");
    }
}
