use crate::{
    codec::{decode_position, decode_range, decode_sexagesimal, decode_signed, parse_integer},
    datetime::DateFields,
    errors::ParsingError,
    layout::{
        Column, ASTAT, AZIMUTH, AZIMUTH_RATE, CLASSIFICATION, ELEVATION, ELEVATION_RATE, EQUINOX,
        MIN_LINE_LEN, OBSERVATION_TYPE, POSITION_X, POSITION_Y, POSITION_Z, RANGE_ACCELERATION,
        RANGE_EXPONENT, RANGE_MANTISSA, RANGE_RATE, SATELLITE, SENSOR, SITE_TAG, SPADOC_TAG,
        TRACK_POSITION,
    },
    prelude::{Classification, Equinox, Measurement, Observation, ObservationType, SensorPosition},
};

use log::trace;

fn first_char(line: &str, column: Column) -> char {
    column.slice(line).chars().next().unwrap_or(' ')
}

fn signed(line: &str, column: Column, decimals: usize) -> Result<f64, ParsingError> {
    decode_signed(column.slice(line), decimals).map_err(|e| column.error(e))
}

fn elevation(line: &str) -> Result<f64, ParsingError> {
    signed(line, ELEVATION, 4)
}

fn azimuth(line: &str, kind: ObservationType) -> Result<f64, ParsingError> {
    if kind.is_sexagesimal() {
        decode_sexagesimal(AZIMUTH.slice(line)).map_err(|e| AZIMUTH.error(e))
    } else {
        signed(line, AZIMUTH, 4)
    }
}

fn range(line: &str) -> Result<f64, ParsingError> {
    let exponent = RANGE_EXPONENT.slice(line);
    decode_range(RANGE_MANTISSA.slice(line), exponent).map_err(|e| RANGE_MANTISSA.error(e))
}

fn position(line: &str) -> Result<SensorPosition, ParsingError> {
    let mut xyz = [0.0_f64; 3];
    for (value, column) in xyz.iter_mut().zip([POSITION_X, POSITION_Y, POSITION_Z].iter()) {
        *value = decode_position(column.slice(line)).map_err(|e| column.error(e))?;
    }
    Ok(SensorPosition::new(xyz[0], xyz[1], xyz[2]))
}

/// Best effort decoding of a trailing integer field:
/// absent, blank or non numeric columns are reported as None.
fn trailing_integer(line: &str, column: Column) -> Option<u64> {
    let content = column.slice_partial(line)?;
    if content.trim().is_empty() {
        return None;
    }
    match parse_integer(content) {
        Ok(value) => Some(value),
        Err(e) => {
            trace!("discarding {} \"{}\": {}", column.name, content, e);
            None
        },
    }
}

impl Measurement {
    /// Decodes the quantities `kind` defines, and only those.
    pub(crate) fn parse(kind: ObservationType, line: &str) -> Result<Self, ParsingError> {
        let measurement = match kind {
            ObservationType::AzEl => Self::AzEl {
                elevation_deg: elevation(line)?,
                azimuth_deg: azimuth(line, kind)?,
            },
            ObservationType::AzElRange => Self::AzElRange {
                elevation_deg: elevation(line)?,
                azimuth_deg: azimuth(line, kind)?,
                range_km: range(line)?,
            },
            ObservationType::AzElRangeRate => Self::AzElRangeRate {
                elevation_deg: elevation(line)?,
                azimuth_deg: azimuth(line, kind)?,
                range_km: range(line)?,
                range_rate_km_s: signed(line, RANGE_RATE, 5)?,
            },
            ObservationType::AzElRangeRates => Self::AzElRangeRates {
                elevation_deg: elevation(line)?,
                azimuth_deg: azimuth(line, kind)?,
                range_km: range(line)?,
                range_rate_km_s: signed(line, RANGE_RATE, 5)?,
                elevation_rate_deg_s: signed(line, ELEVATION_RATE, 4)?,
                azimuth_rate_deg_s: signed(line, AZIMUTH_RATE, 4)?,
                range_accel_km_s2: signed(line, RANGE_ACCELERATION, 4)?,
            },
            ObservationType::RaDec => Self::RaDec {
                declination_deg: elevation(line)?,
                right_ascension_deg: azimuth(line, kind)?,
            },
            ObservationType::Range => Self::Range {
                range_km: range(line)?,
            },
            ObservationType::AzElPosition => Self::AzElPosition {
                elevation_deg: elevation(line)?,
                azimuth_deg: azimuth(line, kind)?,
                position: position(line)?,
            },
            ObservationType::RaDecPosition => Self::RaDecPosition {
                declination_deg: elevation(line)?,
                right_ascension_deg: azimuth(line, kind)?,
                position: position(line)?,
            },
        };
        Ok(measurement)
    }
}

impl Observation {
    /// Parses one B3 line. Trailing line terminators are ignored.
    ///
    /// Mandatory fields (classification, satellite and sensor numbers,
    /// date, observation type and every quantity that type defines)
    /// must decode. Trailing tags are decoded on a best effort basis.
    /// ```
    /// use b3::prelude::{Observation, ObservationType};
    ///
    /// let line = "U2554421123045123456789451234 1234567                                     10";
    /// let obs = Observation::parse(line).unwrap();
    /// assert_eq!(obs.satellite, 25544);
    /// assert_eq!(obs.observation_type(), ObservationType::AzEl);
    /// assert_eq!(obs.measurement.range_km(), None);
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParsingError> {
        let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

        if !line.is_ascii() {
            return Err(ParsingError::NonAscii);
        }

        if line.len() < MIN_LINE_LEN {
            return Err(ParsingError::LineTooShort {
                len: line.len(),
                min: MIN_LINE_LEN,
            });
        }

        let classification = Classification::from_code(first_char(line, CLASSIFICATION))?;

        let satellite =
            parse_integer(SATELLITE.slice(line)).map_err(|e| SATELLITE.error(e))? as u32;

        let sensor = parse_integer(SENSOR.slice(line)).map_err(|e| SENSOR.error(e))? as u16;

        let epoch = DateFields::parse(line)?.to_epoch()?;

        let kind = OBSERVATION_TYPE.slice(line).parse::<ObservationType>()?;

        let measurement = Measurement::parse(kind, line)?;

        let equinox = Equinox::from_code(first_char(line, EQUINOX));

        Ok(Self {
            classification,
            satellite,
            sensor,
            epoch,
            measurement,
            equinox,
            track_position: trailing_integer(line, TRACK_POSITION).map(|v| v as u8),
            astat: trailing_integer(line, ASTAT).map(|v| v as u8),
            site_tag: trailing_integer(line, SITE_TAG).map(|v| v as u32),
            spadoc_tag: trailing_integer(line, SPADOC_TAG).map(|v| v as u32),
            source: Some(line.to_string()),
        })
    }
}

impl std::str::FromStr for Observation {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
