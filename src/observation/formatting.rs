use crate::{
    buffer::LineBuffer,
    codec::{encode_integer, encode_position, encode_range, encode_sexagesimal, encode_signed},
    datetime::DateFields,
    errors::{FieldError, FormattingError},
    layout::{
        Column, ASTAT, AZIMUTH, AZIMUTH_RATE, CLASSIFICATION, DATE, ELEVATION, ELEVATION_RATE,
        EQUINOX, FULL_LINE_LEN, MIN_LINE_LEN, OBSERVATION_TYPE, POSITION_X, POSITION_Y,
        POSITION_Z, RANGE_ACCELERATION, RANGE_EXPONENT, RANGE_MANTISSA, RANGE_RATE, SATELLITE,
        SENSOR, SITE_TAG, SPADOC_TAG, TRACK_POSITION,
    },
    prelude::{Epoch, Measurement, Observation, ObservationType, SensorPosition},
};

use std::io::{BufWriter, Write};

/// Largest satellite number the 5 digit column holds
const MAX_SATELLITE: u32 = 99_999;

/// Largest sensor number the 3 digit column holds
const MAX_SENSOR: u16 = 999;

fn put_signed(
    buf: &mut LineBuffer,
    column: Column,
    value: f64,
    left: usize,
    right: usize,
) -> Result<(), FormattingError> {
    let field = encode_signed(value, left, right).map_err(FormattingError::field(column.name))?;
    buf.put(column, &field);
    Ok(())
}

fn put_elevation(buf: &mut LineBuffer, degrees: f64) -> Result<(), FormattingError> {
    put_signed(buf, ELEVATION, degrees, 2, 4)
}

fn put_azimuth(
    buf: &mut LineBuffer,
    degrees: f64,
    kind: ObservationType,
) -> Result<(), FormattingError> {
    if kind.is_sexagesimal() {
        let field = encode_sexagesimal(degrees).map_err(FormattingError::field(AZIMUTH.name))?;
        buf.put(AZIMUTH, &field);
        Ok(())
    } else {
        put_signed(buf, AZIMUTH, degrees, 3, 4)
    }
}

fn put_range(buf: &mut LineBuffer, km: f64) -> Result<(), FormattingError> {
    let (mantissa, exponent) =
        encode_range(km).map_err(FormattingError::field(RANGE_MANTISSA.name))?;
    buf.put(RANGE_MANTISSA, &mantissa);
    buf.put_char(RANGE_EXPONENT, exponent);
    Ok(())
}

fn put_position(buf: &mut LineBuffer, position: &SensorPosition) -> Result<(), FormattingError> {
    for (column, km) in [
        (POSITION_X, position.x_km),
        (POSITION_Y, position.y_km),
        (POSITION_Z, position.z_km),
    ] {
        let field = encode_position(km).map_err(FormattingError::field(column.name))?;
        buf.put(column, &field);
    }
    Ok(())
}

/// Single digit flag column
fn put_flag(buf: &mut LineBuffer, column: Column, value: u8) -> Result<(), FormattingError> {
    if value > 9 {
        return Err(FormattingError::Field {
            field: column.name,
            source: FieldError::Overflow {
                value: f64::from(value),
                width: 1,
            },
        });
    }
    buf.put_char(column, char::from(b'0' + value));
    Ok(())
}

fn put_integer(buf: &mut LineBuffer, column: Column, value: u32) -> Result<(), FormattingError> {
    let field = encode_integer(u64::from(value), column.width())
        .map_err(FormattingError::field(column.name))?;
    buf.put(column, &field);
    Ok(())
}

impl Measurement {
    /// Writes the quantities this [Measurement] holds. Columns that
    /// its [ObservationType] does not define are left untouched.
    pub(crate) fn format(&self, buf: &mut LineBuffer) -> Result<(), FormattingError> {
        let kind = self.observation_type();
        match self {
            Self::AzEl {
                elevation_deg,
                azimuth_deg,
            } => {
                put_elevation(buf, *elevation_deg)?;
                put_azimuth(buf, *azimuth_deg, kind)?;
            },
            Self::AzElRange {
                elevation_deg,
                azimuth_deg,
                range_km,
            } => {
                put_elevation(buf, *elevation_deg)?;
                put_azimuth(buf, *azimuth_deg, kind)?;
                put_range(buf, *range_km)?;
            },
            Self::AzElRangeRate {
                elevation_deg,
                azimuth_deg,
                range_km,
                range_rate_km_s,
            } => {
                put_elevation(buf, *elevation_deg)?;
                put_azimuth(buf, *azimuth_deg, kind)?;
                put_range(buf, *range_km)?;
                put_signed(buf, RANGE_RATE, *range_rate_km_s, 2, 5)?;
            },
            Self::AzElRangeRates {
                elevation_deg,
                azimuth_deg,
                range_km,
                range_rate_km_s,
                elevation_rate_deg_s,
                azimuth_rate_deg_s,
                range_accel_km_s2,
            } => {
                put_elevation(buf, *elevation_deg)?;
                put_azimuth(buf, *azimuth_deg, kind)?;
                put_range(buf, *range_km)?;
                put_signed(buf, RANGE_RATE, *range_rate_km_s, 2, 5)?;
                put_signed(buf, ELEVATION_RATE, *elevation_rate_deg_s, 1, 4)?;
                put_signed(buf, AZIMUTH_RATE, *azimuth_rate_deg_s, 1, 4)?;
                put_signed(buf, RANGE_ACCELERATION, *range_accel_km_s2, 1, 4)?;
            },
            Self::RaDec {
                declination_deg,
                right_ascension_deg,
            } => {
                put_elevation(buf, *declination_deg)?;
                put_azimuth(buf, *right_ascension_deg, kind)?;
            },
            Self::Range { range_km } => {
                put_range(buf, *range_km)?;
            },
            Self::AzElPosition {
                elevation_deg,
                azimuth_deg,
                position,
            } => {
                put_elevation(buf, *elevation_deg)?;
                put_azimuth(buf, *azimuth_deg, kind)?;
                put_position(buf, position)?;
            },
            Self::RaDecPosition {
                declination_deg,
                right_ascension_deg,
                position,
            } => {
                put_elevation(buf, *declination_deg)?;
                put_azimuth(buf, *right_ascension_deg, kind)?;
                put_position(buf, position)?;
            },
        }
        Ok(())
    }
}

impl Observation {
    /// Writes this [Observation] into `buf` and returns the line length:
    /// 90 when any trailing tag is set, 76 otherwise.
    /// `epoch` replaces [Observation::epoch] in the date columns.
    pub(crate) fn format_into(
        &self,
        buf: &mut LineBuffer,
        epoch: Option<Epoch>,
    ) -> Result<usize, FormattingError> {
        // clear potential past residues
        buf.clear();

        if self.satellite > MAX_SATELLITE {
            return Err(FormattingError::SatelliteNumber(self.satellite));
        }
        if self.sensor > MAX_SENSOR {
            return Err(FormattingError::SensorNumber(self.sensor));
        }

        buf.put_char(CLASSIFICATION, self.classification.code());
        put_integer(buf, SATELLITE, self.satellite)?;
        put_integer(buf, SENSOR, u32::from(self.sensor))?;

        let date = DateFields::from_epoch(epoch.unwrap_or(self.epoch))?;
        buf.put(DATE, &date.format());

        self.measurement.format(buf)?;

        buf.put_char(
            OBSERVATION_TYPE,
            char::from(b'0' + self.observation_type().code()),
        );

        if let Some(equinox) = self.equinox {
            buf.put_char(EQUINOX, equinox.code());
        }

        if !self.has_trailing_tags() {
            return Ok(MIN_LINE_LEN);
        }

        if let Some(track) = self.track_position {
            put_flag(buf, TRACK_POSITION, track)?;
        }
        if let Some(astat) = self.astat {
            put_flag(buf, ASTAT, astat)?;
        }
        if let Some(tag) = self.site_tag {
            put_integer(buf, SITE_TAG, tag)?;
        }
        if let Some(tag) = self.spadoc_tag {
            put_integer(buf, SPADOC_TAG, tag)?;
        }

        Ok(FULL_LINE_LEN)
    }

    /// Generates the B3 line describing this [Observation].
    /// ```
    /// use b3::prelude::{Epoch, Measurement, Observation};
    ///
    /// let epoch = Epoch::from_gregorian_utc(2023, 2, 14, 12, 34, 56, 789_000_000);
    /// let obs = Observation::new(25544, 211, epoch, Measurement::AzEl {
    ///     elevation_deg: 45.1234,
    ///     azimuth_deg: 123.4567,
    /// });
    ///
    /// let line = obs.format_line().unwrap();
    /// assert_eq!(line.len(), 76);
    /// assert!(line.starts_with("U2554421123045123456789451234 1234567"));
    /// assert!(line.ends_with("10"));
    /// ```
    pub fn format_line(&self) -> Result<String, FormattingError> {
        let mut buf = LineBuffer::new();
        let len = self.format_into(&mut buf, None)?;
        Ok(buf.to_line(len))
    }

    /// Generates the B3 line describing this [Observation],
    /// dated `epoch` instead of [Observation::epoch].
    pub fn format_line_at(&self, epoch: Epoch) -> Result<String, FormattingError> {
        let mut buf = LineBuffer::new();
        let len = self.format_into(&mut buf, Some(epoch))?;
        Ok(buf.to_line(len))
    }

    /// Formats this [Observation] as one terminated B3 line,
    /// reusing `buf` between calls.
    pub fn format<W: Write>(
        &self,
        writer: &mut BufWriter<W>,
        buf: &mut LineBuffer,
        epoch: Option<Epoch>,
    ) -> Result<(), FormattingError> {
        let len = self.format_into(buf, epoch)?;
        writeln!(writer, "{}", buf.to_line(len))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{
        buffer::LineBuffer,
        errors::{FieldError, FormattingError},
        prelude::{Classification, Epoch, Equinox, Measurement, Observation, SensorPosition},
        tests::toolkit::{TYPE1, TYPE4, TYPE5, TYPE6, TYPE8},
    };
    use std::io::BufWriter;

    fn epoch() -> Epoch {
        Epoch::from_gregorian_utc(2023, 2, 14, 12, 34, 56, 789_000_000)
    }

    #[test]
    fn built_from_scratch() {
        let obs = Observation::new(
            25544,
            211,
            epoch(),
            Measurement::AzElRangeRates {
                elevation_deg: -12.3456,
                azimuth_deg: 123.4567,
                range_km: 1234.567,
                range_rate_km_s: -1.23456,
                elevation_rate_deg_s: 0.1234,
                azimuth_rate_deg_s: -0.5,
                range_accel_km_s2: 0.0012,
            },
        )
        .with_equinox(Equinox::J2000);
        assert_eq!(obs.format_line().unwrap(), TYPE4);

        let obs = Observation::new(
            12345,
            101,
            epoch(),
            Measurement::RaDec {
                declination_deg: -5.0,
                right_ascension_deg: 187.5625,
            },
        )
        .with_classification(Classification::Secret)
        .with_equinox(Equinox::J2000);
        assert_eq!(obs.format_line().unwrap(), TYPE5);

        let obs = Observation::new(
            25544,
            211,
            epoch(),
            Measurement::AzElPosition {
                elevation_deg: 45.1234,
                azimuth_deg: 123.4567,
                position: SensorPosition::new(6378.137, -12.345, 1.0),
            },
        );
        assert_eq!(obs.format_line().unwrap(), TYPE8);
    }

    #[test]
    fn undefined_columns_are_blank() {
        let obs = Observation::parse(TYPE6).unwrap();
        let line = obs.format_line().unwrap();
        assert_eq!(&line[23..38], "               ");
        assert_eq!(&line[46..74], "                            ");

        // type 8 has no range slot
        let line = Observation::parse(TYPE8).unwrap().format_line().unwrap();
        assert_eq!(&line[37..46], "         ");
    }

    #[test]
    fn identifier_limits() {
        let obs = Observation::parse(TYPE1).unwrap();

        let mut max = obs.clone();
        max.satellite = 99999;
        max.sensor = 999;
        let line = max.format_line().unwrap();
        assert_eq!(&line[1..9], "99999999");

        let mut small = obs.clone();
        small.satellite = 5;
        small.sensor = 7;
        let line = small.format_line().unwrap();
        assert_eq!(&line[1..9], "00005007");

        let mut too_large = obs.clone();
        too_large.satellite = 100000;
        assert!(matches!(
            too_large.format_line(),
            Err(FormattingError::SatelliteNumber(100000))
        ));

        let mut too_large = obs;
        too_large.sensor = 1000;
        assert!(matches!(
            too_large.format_line(),
            Err(FormattingError::SensorNumber(1000))
        ));
    }

    #[test]
    fn epoch_override() {
        let obs = Observation::parse(TYPE1).unwrap();
        let other = Epoch::from_gregorian_utc(1999, 12, 31, 23, 59, 59, 999_000_000);
        let line = obs.format_line_at(other).unwrap();
        assert_eq!(&line[9..23], "99365235959999");
        assert_eq!(&line[..9], &TYPE1[..9]);
        assert_eq!(&line[23..], &TYPE1[23..]);

        // sub millisecond residues are truncated
        let fine = Epoch::from_gregorian_utc(2023, 2, 14, 12, 34, 56, 789_900_000);
        assert_eq!(obs.format_line_at(fine).unwrap(), TYPE1);

        let too_late = Epoch::from_gregorian_utc_at_midnight(2050, 1, 1);
        assert!(matches!(
            obs.format_line_at(too_late),
            Err(FormattingError::Year(2050))
        ));
    }

    #[test]
    fn equinox_column() {
        let obs = Observation::parse(TYPE1).unwrap();
        for (equinox, code) in [
            (Equinox::Teme, '0'),
            (Equinox::MeanOfYear, '1'),
            (Equinox::J2000, '2'),
            (Equinox::B1950, '3'),
        ] {
            let line = obs.with_equinox(equinox).format_line().unwrap();
            assert_eq!(line.chars().nth(75), Some(code));
        }

        let mut unset = obs;
        unset.equinox = None;
        let line = unset.format_line().unwrap();
        assert_eq!(line.chars().nth(75), Some(' '));
        // blank reads back as TEME
        let parsed = Observation::parse(&line).unwrap();
        assert_eq!(parsed.equinox, Some(Equinox::Teme));
    }

    #[test]
    fn trailing_tags() {
        let obs = Observation::parse(TYPE1)
            .unwrap()
            .with_track_position(3)
            .with_astat(2)
            .with_site_tag(123)
            .with_spadoc_tag(45678);

        let line = obs.format_line().unwrap();
        assert_eq!(line.len(), 90);
        assert_eq!(&line[..76], TYPE1);
        assert_eq!(&line[76..], "3  20123 45678");
        assert_eq!(Observation::parse(&line).unwrap(), obs);

        let line = Observation::parse(TYPE1)
            .unwrap()
            .with_site_tag(7)
            .format_line()
            .unwrap();
        assert_eq!(&line[76..], "    0007      ");

        let invalid = Observation::parse(TYPE1).unwrap().with_astat(12);
        match invalid.format_line() {
            Err(FormattingError::Field { field, source }) => {
                assert_eq!(field, "astat");
                assert!(matches!(source, FieldError::Overflow { width: 1, .. }));
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn quantity_overflow() {
        let obs = Observation::new(
            1,
            1,
            epoch(),
            Measurement::AzElRangeRate {
                elevation_deg: 45.0,
                azimuth_deg: 90.0,
                range_km: 1000.0,
                range_rate_km_s: 150.0,
            },
        );
        match obs.format_line() {
            Err(FormattingError::Field { field, .. }) => assert_eq!(field, "range rate"),
            other => panic!("unexpected {:?}", other),
        }

        for range_km in [5.0, 0.0, -0.0] {
            let obs = Observation::new(1, 1, epoch(), Measurement::Range { range_km });
            match obs.format_line() {
                Err(FormattingError::Field { field, source }) => {
                    assert_eq!(field, "range");
                    assert_eq!(source, FieldError::Exponent(-1));
                },
                other => panic!("{} unexpected {:?}", range_km, other),
            }
        }
    }

    #[test]
    fn buffered_writer() {
        let mut buf = LineBuffer::new();
        let mut writer = BufWriter::new(Vec::new());
        for line in [TYPE4, TYPE1] {
            let obs = Observation::parse(line).unwrap();
            obs.format(&mut writer, &mut buf, None).unwrap();
        }
        let content = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(content, format!("{}\n{}\n", TYPE4, TYPE1));
    }
}
