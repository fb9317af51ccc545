//! Signed magnitude with implied decimal point and letter substituted sign.
use super::parse_digits;
use crate::errors::FieldError;

/// Letters replacing a leading digit 1..=9 on negative values.
pub const SIGN_LETTERS: [char; 9] = ['J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R'];

fn negative_lead(digit: u8) -> char {
    match digit {
        0 => '-',
        d => SIGN_LETTERS[usize::from(d - 1)],
    }
}

/// Encodes `value` on `left + right` digits with `right` implied decimals.
///
/// Negative values keep the field width: a leading `0` becomes `-`
/// and a leading `1..=9` becomes the matching letter in [SIGN_LETTERS].
/// ```
/// use b3::codec::encode_signed;
/// assert_eq!(encode_signed(45.1234, 2, 4).unwrap(), "451234");
/// assert_eq!(encode_signed(-12.3456, 2, 4).unwrap(), "J23456");
/// assert_eq!(encode_signed(-1.23456, 2, 5).unwrap(), "-123456");
/// ```
pub fn encode_signed(value: f64, left: usize, right: usize) -> Result<String, FieldError> {
    if !value.is_finite() {
        return Err(FieldError::NotFinite);
    }

    let width = left + right;
    let scaled = (value.abs() * 10f64.powi(right as i32)).round();

    if scaled >= 10f64.powi(width as i32) {
        return Err(FieldError::Overflow { value, width });
    }

    let digits = format!("{:0width$}", scaled as u64, width = width);

    if value >= 0.0 || scaled == 0.0 {
        return Ok(digits);
    }

    let lead = negative_lead(digits.as_bytes()[0] - b'0');
    Ok(format!("{}{}", lead, &digits[1..]))
}

/// Decodes a signed magnitude field holding `right` implied decimals.
/// Decoding never rounds.
pub fn decode_signed(field: &str, right: usize) -> Result<f64, FieldError> {
    if field.trim().is_empty() {
        return Err(FieldError::Empty);
    }

    let mut chars = field.chars();
    let lead = chars.next().ok_or(FieldError::Empty)?;

    let (negative, lead_digit) = match lead {
        '-' => (true, 0),
        '+' | ' ' => (false, 0),
        c if c.is_ascii_digit() => (false, c as u64 - '0' as u64),
        c => match SIGN_LETTERS.iter().position(|l| *l == c) {
            Some(i) => (true, i as u64 + 1),
            None => return Err(FieldError::UnexpectedChar(c)),
        },
    };

    let magnitude = parse_digits(&format!("{}{}", lead_digit, chars.as_str()))?;

    let value = magnitude as f64 / 10f64.powi(right as i32);
    Ok(if negative { -value } else { value })
}
