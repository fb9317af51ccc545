//! Hours / minutes / deciseconds angle field (`HHMMSSS`).
use super::parse_digits;
use crate::errors::FieldError;

/// Field width.
pub const SEXAGESIMAL_WIDTH: usize = 7;

/// Deciseconds of time in one hour.
const DECISECONDS_PER_HOUR: u32 = 36_000;

/// Deciseconds of time in a full turn (24h).
const DECISECONDS_PER_TURN: u32 = 24 * DECISECONDS_PER_HOUR;

/// Encodes an angle in degrees as `HHMMSSS`, one implied decimal on seconds.
/// Input is normalized into [0, 360) first; 15° per hour of time.
/// ```
/// use b3::codec::encode_sexagesimal;
/// assert_eq!(encode_sexagesimal(187.5625).unwrap(), "1230150");
/// assert_eq!(encode_sexagesimal(-15.0).unwrap(), "2300000");
/// ```
pub fn encode_sexagesimal(degrees: f64) -> Result<String, FieldError> {
    if !degrees.is_finite() {
        return Err(FieldError::NotFinite);
    }

    let normalized = degrees.rem_euclid(360.0);
    let hours = normalized / 15.0;

    // rounding may reach a full turn
    let total = (hours * f64::from(DECISECONDS_PER_HOUR)).round() as u32 % DECISECONDS_PER_TURN;

    Ok(format!(
        "{:02}{:02}{:03}",
        total / DECISECONDS_PER_HOUR,
        (total / 600) % 60,
        total % 600
    ))
}

/// Decodes `HHMMSSS` into degrees: `(HH + MM/60 + SSS/36000) * 15`.
pub fn decode_sexagesimal(field: &str) -> Result<f64, FieldError> {
    if field.trim().is_empty() {
        return Err(FieldError::Empty);
    }
    if field.len() != SEXAGESIMAL_WIDTH || !field.is_ascii() {
        return Err(FieldError::Width {
            expected: SEXAGESIMAL_WIDTH,
            found: field.len(),
        });
    }

    let hours = parse_digits(&field[0..2])? as f64;
    let minutes = parse_digits(&field[2..4])? as f64;
    let deciseconds = parse_digits(&field[4..7])? as f64;

    Ok((hours + minutes / 60.0 + deciseconds / 36_000.0) * 15.0)
}
