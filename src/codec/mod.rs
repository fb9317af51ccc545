//! Scalar field encodings used by B3 lines.
//!
//! Every function here is pure and works on a single fixed width field,
//! independently of where that field sits within a line.
mod position;
mod range;
mod sexagesimal;
mod signed;

pub use position::{decode_position, encode_position, POSITION_WIDTH};
pub use range::{decode_range, encode_range, RANGE_MANTISSA_WIDTH};
pub use sexagesimal::{decode_sexagesimal, encode_sexagesimal, SEXAGESIMAL_WIDTH};
pub use signed::{decode_signed, encode_signed, SIGN_LETTERS};

use crate::errors::FieldError;

/// Accumulates decimal digits into an integer.
pub(crate) fn parse_digits(s: &str) -> Result<u64, FieldError> {
    if s.is_empty() {
        return Err(FieldError::Empty);
    }
    let mut value = 0u64;
    for c in s.chars() {
        let digit = c.to_digit(10).ok_or(FieldError::UnexpectedChar(c))?;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(FieldError::Overflow {
                value: f64::INFINITY,
                width: s.len(),
            })?;
    }
    Ok(value)
}

/// Parses an unsigned integer field, tolerating blank padding.
pub(crate) fn parse_integer(s: &str) -> Result<u64, FieldError> {
    parse_digits(s.trim())
}

/// Zero padded unsigned integer of exactly `width` digits.
pub(crate) fn encode_integer(value: u64, width: usize) -> Result<String, FieldError> {
    let s = format!("{:0width$}", value, width = width);
    if s.len() > width {
        Err(FieldError::Overflow {
            value: value as f64,
            width,
        })
    } else {
        Ok(s)
    }
}

#[cfg(test)]
mod test {
    use super::{encode_integer, parse_digits, parse_integer};
    use crate::errors::FieldError;

    #[test]
    fn digits() {
        assert_eq!(parse_digits("00042"), Ok(42));
        assert_eq!(parse_digits(""), Err(FieldError::Empty));
        assert_eq!(parse_digits("4 2"), Err(FieldError::UnexpectedChar(' ')));
        assert_eq!(parse_integer("  42 "), Ok(42));
        assert_eq!(parse_integer("    "), Err(FieldError::Empty));
    }

    #[test]
    fn integers() {
        assert_eq!(encode_integer(99999, 5).unwrap(), "99999");
        assert_eq!(encode_integer(7, 3).unwrap(), "007");
        assert!(matches!(
            encode_integer(100000, 5),
            Err(FieldError::Overflow { width: 5, .. })
        ));
    }
}
