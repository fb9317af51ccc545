//! Signed fixed point sensor position component: explicit sign followed
//! by 8 digits, 3 of them decimals (kilometers, meter resolution).
use super::parse_digits;
use crate::errors::FieldError;

/// Field width, sign included.
pub const POSITION_WIDTH: usize = 9;

const DIGITS: usize = POSITION_WIDTH - 1;

/// Encodes a position component given in kilometers.
/// ```
/// use b3::codec::encode_position;
/// assert_eq!(encode_position(6378.137).unwrap(), "+06378137");
/// assert_eq!(encode_position(-12.345).unwrap(), "-00012345");
/// ```
pub fn encode_position(km: f64) -> Result<String, FieldError> {
    if !km.is_finite() {
        return Err(FieldError::NotFinite);
    }

    let scaled = (km.abs() * 1.0E3).round();
    if scaled >= 1.0E8 {
        return Err(FieldError::Overflow {
            value: km,
            width: DIGITS,
        });
    }

    let sign = if km < 0.0 && scaled > 0.0 { '-' } else { '+' };
    Ok(format!("{}{:0width$}", sign, scaled as u64, width = DIGITS))
}

/// Decodes a position component, in kilometers.
pub fn decode_position(field: &str) -> Result<f64, FieldError> {
    if field.trim().is_empty() {
        return Err(FieldError::Empty);
    }

    let (negative, digits) = match field.chars().next() {
        Some('-') => (true, &field[1..]),
        Some('+') | Some(' ') => (false, &field[1..]),
        _ => (false, field),
    };

    let value = parse_digits(digits)? as f64 / 1.0E3;
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod test {
    use super::{decode_position, encode_position};
    use crate::errors::FieldError;

    #[test]
    fn encoding() {
        for (km, expected) in [
            (6378.137, "+06378137"),
            (-12.345, "-00012345"),
            (1.0, "+00001000"),
            (-0.0001, "+00000000"),
            (99999.999, "+99999999"),
        ] {
            assert_eq!(encode_position(km).unwrap(), expected);
        }
        assert!(matches!(
            encode_position(100_000.0),
            Err(FieldError::Overflow { width: 8, .. })
        ));
    }

    #[test]
    fn decoding() {
        for (field, km) in [
            ("+06378137", 6378.137),
            ("-00012345", -12.345),
            (" 00001000", 1.0),
            ("006378137", 6378.137),
        ] {
            assert_eq!(decode_position(field).unwrap(), km);
        }
        assert_eq!(decode_position("         "), Err(FieldError::Empty));
        assert_eq!(decode_position("+0637813a"), Err(FieldError::UnexpectedChar('a')));
    }
}
