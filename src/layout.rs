//! B3 column layout (0-indexed, half open byte ranges)
use crate::errors::{FieldError, ParsingError};

/// A named fixed column range within a B3 line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Field name, reported in errors
    pub name: &'static str,
    /// First byte (inclusive)
    pub start: usize,
    /// Last byte (exclusive)
    pub end: usize,
}

impl Column {
    pub(crate) const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, start, end }
    }

    /// Width of this column in characters.
    pub const fn width(&self) -> usize {
        self.end - self.start
    }

    /// Content of this column. `line` must be ASCII and long enough.
    pub(crate) fn slice<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end]
    }

    /// Content of this column, possibly truncated by a short line.
    /// None when the column starts past the end of the line.
    pub(crate) fn slice_partial<'a>(&self, line: &'a str) -> Option<&'a str> {
        if self.start >= line.len() {
            None
        } else {
            line.get(self.start..self.end.min(line.len()))
        }
    }

    pub(crate) fn error(&self, source: FieldError) -> ParsingError {
        ParsingError::Field {
            field: self.name,
            start: self.start,
            end: self.end,
            source,
        }
    }
}

pub const CLASSIFICATION: Column = Column::new("classification", 0, 1);
pub const SATELLITE: Column = Column::new("satellite number", 1, 6);
pub const SENSOR: Column = Column::new("sensor number", 6, 9);
pub const DATE: Column = Column::new("date", 9, 23);
pub const YEAR: Column = Column::new("year", 9, 11);
pub const DAY_OF_YEAR: Column = Column::new("day of year", 11, 14);
pub const HOUR: Column = Column::new("hour", 14, 16);
pub const MINUTE: Column = Column::new("minute", 16, 18);
pub const SECOND: Column = Column::new("second", 18, 20);
pub const MILLISECOND: Column = Column::new("millisecond", 20, 23);
pub const ELEVATION: Column = Column::new("elevation/declination", 23, 29);
pub const AZIMUTH: Column = Column::new("azimuth/right ascension", 30, 37);
pub const RANGE_MANTISSA: Column = Column::new("range", 38, 45);
pub const RANGE_EXPONENT: Column = Column::new("range exponent", 45, 46);
pub const RANGE_RATE: Column = Column::new("range rate", 47, 54);
pub const ELEVATION_RATE: Column = Column::new("elevation rate", 55, 60);
pub const AZIMUTH_RATE: Column = Column::new("azimuth rate", 61, 66);
pub const RANGE_ACCELERATION: Column = Column::new("range acceleration", 67, 72);
pub const POSITION_X: Column = Column::new("sensor position x", 46, 55);
pub const POSITION_Y: Column = Column::new("sensor position y", 55, 64);
pub const POSITION_Z: Column = Column::new("sensor position z", 64, 73);
pub const OBSERVATION_TYPE: Column = Column::new("observation type", 74, 75);
pub const EQUINOX: Column = Column::new("equinox", 75, 76);
pub const TRACK_POSITION: Column = Column::new("track position", 76, 77);
pub const ASTAT: Column = Column::new("astat", 79, 80);
pub const SITE_TAG: Column = Column::new("site tag", 80, 84);
pub const SPADOC_TAG: Column = Column::new("spadoc tag", 85, 90);

/// Shortest valid line: every mandatory column plus the equinox code.
pub const MIN_LINE_LEN: usize = 76;

/// Line length once any trailing tag (track, astat, site, SPADOC) is present.
pub const FULL_LINE_LEN: usize = 90;
