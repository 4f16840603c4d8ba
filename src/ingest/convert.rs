//! Typed field conversion
//!
//! Converts raw field bytes into column values. A field is only accepted when
//! the numeric literal spans the whole field: partial leading matches such as
//! `12a` are rejected.

use crate::error::ParseErrorKind;

/// A value type a column can hold
pub trait FieldValue: Copy + Default {
    /// Convert the full field text, leading whitespace excepted
    fn parse_field(raw: &[u8]) -> Result<Self, ParseErrorKind>;
}

impl FieldValue for i32 {
    fn parse_field(raw: &[u8]) -> Result<Self, ParseErrorKind> {
        let text = raw.trim_ascii_start();
        let (negative, digits) = match text.split_first() {
            Some((b'-', rest)) => (true, rest),
            Some((b'+', rest)) => (false, rest),
            _ => (false, text),
        };

        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(ParseErrorKind::InvalidFormat);
        }

        // Saturates on absurdly long digit runs so they still report out of range.
        let magnitude = digits.iter().fold(0i64, |acc, &digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });
        let value = if negative { -magnitude } else { magnitude };

        i32::try_from(value).map_err(|_| ParseErrorKind::OutOfRange)
    }
}

impl FieldValue for f64 {
    fn parse_field(raw: &[u8]) -> Result<Self, ParseErrorKind> {
        let text = std::str::from_utf8(raw.trim_ascii_start())
            .map_err(|_| ParseErrorKind::InvalidFormat)?;

        let value: f64 = text.parse().map_err(|_| ParseErrorKind::InvalidFormat)?;

        // Finite literals that round to infinity overflowed the representation.
        if value.is_infinite() && !text.to_ascii_lowercase().contains("inf") {
            return Err(ParseErrorKind::OutOfRange);
        }
        Ok(value)
    }
}
