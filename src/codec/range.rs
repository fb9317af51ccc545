//! Exponent packed range: 7 digit mantissa followed by one exponent digit.
use super::parse_digits;
use crate::errors::FieldError;

/// Number of mantissa digits.
pub const RANGE_MANTISSA_WIDTH: usize = 7;

/// Encodes a range magnitude as (mantissa, exponent digit).
///
/// The mantissa holds the first seven significant digits (decimal point
/// removed, zero filled on the right). The exponent digit is
/// `floor(log10(value)) - 1` and must lie within 0..=9.
/// ```
/// use b3::codec::encode_range;
/// assert_eq!(encode_range(1234.567).unwrap(), ("1234567".to_string(), '2'));
/// assert_eq!(encode_range(10.0).unwrap(), ("1000000".to_string(), '0'));
/// ```
pub fn encode_range(value: f64) -> Result<(String, char), FieldError> {
    if !value.is_finite() {
        return Err(FieldError::NotFinite);
    }
    if value < 0.0 {
        return Err(FieldError::Negative(value));
    }

    // -0.0 would otherwise print its sign
    let value = value.abs();

    // f64 Display is positional (never scientific) and shortest round-trip,
    // so significant digits are read straight off the decimal representation.
    let repr = value.to_string();
    let integer_digits = repr.split('.').next().unwrap_or("").len() as i32;
    let exponent = integer_digits - 2;

    if !(0..=9).contains(&exponent) {
        return Err(FieldError::Exponent(exponent));
    }

    let mut mantissa: String = repr
        .chars()
        .filter(|c| *c != '.')
        .take(RANGE_MANTISSA_WIDTH)
        .collect();

    while mantissa.len() < RANGE_MANTISSA_WIDTH {
        mantissa.push('0');
    }

    Ok((mantissa, char::from(b'0' + exponent as u8)))
}

/// Decodes a range from its mantissa and exponent fields:
/// `mantissa * 10^exponent / 1E5`.
pub fn decode_range(mantissa: &str, exponent: &str) -> Result<f64, FieldError> {
    if mantissa.trim().is_empty() {
        return Err(FieldError::Empty);
    }
    let mantissa = parse_digits(mantissa)?;
    let exponent = parse_digits(exponent.trim())?;
    if exponent > 9 {
        return Err(FieldError::Exponent(exponent as i32));
    }
    Ok(mantissa as f64 * 10f64.powi(exponent as i32) / 1.0E5)
}

#[cfg(test)]
mod test {
    use super::{decode_range, encode_range};
    use crate::errors::FieldError;
    use rand::{thread_rng, Rng};

    #[test]
    fn encoding() {
        for (value, mantissa, exponent) in [
            (1234.567, "1234567", '2'),
            (10.0, "1000000", '0'),
            (99.99999, "9999999", '0'),
            (35786.123, "3578612", '3'),
            (100.0, "1000000", '1'),
            (12345678901.0, "1234567", '9'),
        ] {
            let (m, e) = encode_range(value).unwrap();
            assert_eq!(m, mantissa, "{}", value);
            assert_eq!(e, exponent, "{}", value);
        }
    }

    #[test]
    fn decoding() {
        let value = decode_range("1234567", "2").unwrap();
        assert!((value - 1234.567).abs() < 1.0E-9);
        let value = decode_range("1000000", "0").unwrap();
        assert!((value - 10.0).abs() < 1.0E-12);
        assert_eq!(decode_range("12a4567", "2"), Err(FieldError::UnexpectedChar('a')));
        assert_eq!(decode_range("1234567", " "), Err(FieldError::Empty));
    }

    #[test]
    fn exponent_out_of_range() {
        for value in [9.5, 1.0, 0.0, -0.0, 0.5, 1.0E11, 5.0E15] {
            assert!(
                matches!(encode_range(value), Err(FieldError::Exponent(_))),
                "{} should not be encodable",
                value
            );
        }
        assert_eq!(encode_range(-100.0), Err(FieldError::Negative(-100.0)));
        assert_eq!(encode_range(f64::INFINITY), Err(FieldError::NotFinite));
    }

    #[test]
    fn sampled_round_trip() {
        let mut rng = thread_rng();
        for _ in 0..1000 {
            let exponent = rng.gen_range(1..9);
            let value = rng.gen_range(1.0..10.0) * 10f64.powi(exponent);
            let (mantissa, exponent) = encode_range(value).unwrap();
            let decoded = decode_range(&mantissa, &exponent.to_string()).unwrap();
            assert!(
                ((decoded - value) / value).abs() < 1.0E-5,
                "{} -> {}{} -> {}",
                value,
                mantissa,
                exponent,
                decoded
            );
        }
    }
}
