//! Argument checks run before any native call.

use std::num::IntErrorKind;

use crate::error::{Error, Result};

use super::geometry::Limit;

/// Read a textual argument as an integer.
///
/// Anything that is not a plain integer literal (floats, empty strings, words)
/// is an [`Error::ArgumentType`]. Sign is kept so that range checking can
/// report negatives separately. Integers too wide for `i64` saturate, which
/// still fails the range check with the right message.
pub fn parse_arg(text: &str) -> Result<i64> {
    text.trim().parse::<i64>().or_else(|e| match e.kind() {
        IntErrorKind::PosOverflow => Ok(i64::MAX),
        IntErrorKind::NegOverflow => Ok(i64::MIN),
        _ => Err(Error::ArgumentType {
            value: text.to_string(),
        }),
    })
}

/// Check one value against the backend's bound
pub fn check(value: i64, limit: Limit) -> Result<u16> {
    let max = limit.max();
    if value < 0 || value > i64::from(max) {
        return Err(Error::ArgumentRange { value, limit: max });
    }
    Ok(value as u16)
}

/// Check a coordinate or size pair; the first bad value wins
pub fn check_pair(a: i64, b: i64, limit: Limit) -> Result<(u16, u16)> {
    let a = check(a, limit)?;
    let b = check(b, limit)?;
    Ok((a, b))
}

/// Parse and check a textual pair
pub fn parse_pair(a: &str, b: &str, limit: Limit) -> Result<(u16, u16)> {
    let a = parse_arg(a)?;
    let b = parse_arg(b)?;
    check_pair(a, b, limit)
}
