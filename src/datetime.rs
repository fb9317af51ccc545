//! B3 date columns and Days-Since-1950 (DS50) conversions.
use crate::{
    codec::parse_integer,
    errors::{FormattingError, ParsingError},
    layout::{Column, DAY_OF_YEAR, HOUR, MILLISECOND, MINUTE, SECOND, YEAR},
};

use hifitime::{Epoch, Unit};

/// MJD (UTC) of the DS50 reference instant, 1949-12-31T00:00:00 UTC.
pub const DS50_MJD_UTC: f64 = 33_281.0;

/// Two digit years below this pivot belong to the 2000s.
pub const YEAR_PIVOT: u8 = 50;

/// First day of each month, counted from January 1st, in a common year.
const MONTH_OFFSETS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// DS50 reference [Epoch].
pub fn ds50_epoch() -> Epoch {
    Epoch::from_mjd_utc(DS50_MJD_UTC)
}

/// Converts an [Epoch] to fractional days since the DS50 reference.
pub fn epoch_to_ds50(epoch: Epoch) -> f64 {
    epoch.to_mjd_utc_days() - DS50_MJD_UTC
}

/// Converts fractional days since the DS50 reference to an [Epoch],
/// rounded to the millisecond (the resolution of the date columns).
pub fn epoch_from_ds50(days: f64) -> Epoch {
    Epoch::from_mjd_utc(days + DS50_MJD_UTC).round(1.0 * Unit::Millisecond)
}

/// Expands a two digit year around [YEAR_PIVOT].
pub fn expand_year(yy: u8) -> i32 {
    if yy < YEAR_PIVOT {
        2000 + i32::from(yy)
    } else {
        1900 + i32::from(yy)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

fn month_offset(year: i32, month: usize) -> u16 {
    let leap = if month >= 2 && is_leap_year(year) { 1 } else { 0 };
    MONTH_OFFSETS[month] + leap
}

/// Month (1..=12) and day of month for a 1-based day of year.
pub fn month_day(year: i32, doy: u16) -> Option<(u8, u8)> {
    if doy == 0 || doy > days_in_year(year) {
        return None;
    }
    let month = (0..12).rev().find(|m| month_offset(year, *m) < doy)?;
    Some(((month + 1) as u8, (doy - month_offset(year, month)) as u8))
}

/// 1-based day of year.
pub fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    let month = usize::from(month.max(1).min(12)) - 1;
    month_offset(year, month) + u16::from(day)
}

/// Date and time of day, as laid out in the B3 date columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFields {
    /// Four digit year
    pub year: i32,
    /// 1-based day of year
    pub doy: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

fn parse_column(line: &str, column: Column) -> Result<u64, ParsingError> {
    parse_integer(column.slice(line)).map_err(|e| column.error(e))
}

impl DateFields {
    /// Decodes the date columns of a B3 line. Calendar ranges are
    /// checked by [DateFields::to_epoch].
    pub fn parse(line: &str) -> Result<Self, ParsingError> {
        let yy = parse_column(line, YEAR)?;
        Ok(Self {
            year: expand_year(yy as u8),
            doy: parse_column(line, DAY_OF_YEAR)? as u16,
            hour: parse_column(line, HOUR)? as u8,
            minute: parse_column(line, MINUTE)? as u8,
            second: parse_column(line, SECOND)? as u8,
            millisecond: parse_column(line, MILLISECOND)? as u16,
        })
    }

    /// Builds the UTC [Epoch]. Fails on any out of range calendar value.
    pub fn to_epoch(&self) -> Result<Epoch, ParsingError> {
        let (month, day) = month_day(self.year, self.doy).ok_or_else(|| {
            ParsingError::InvalidDate(format!("day {} of year {}", self.doy, self.year))
        })?;

        if self.hour > 23 || self.minute > 59 || self.second > 59 {
            return Err(ParsingError::InvalidDate(format!(
                "time of day {:02}:{:02}:{:02}",
                self.hour, self.minute, self.second
            )));
        }

        Epoch::maybe_from_gregorian_utc(
            self.year,
            month,
            day,
            self.hour,
            self.minute,
            self.second,
            u32::from(self.millisecond) * 1_000_000,
        )
        .map_err(|e| ParsingError::InvalidDate(e.to_string()))
    }

    /// Decomposes an [Epoch] (sub-millisecond part truncated).
    /// Fails when the year cannot be written on two digits.
    pub fn from_epoch(epoch: Epoch) -> Result<Self, FormattingError> {
        let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();

        let first = expand_year(YEAR_PIVOT);
        if year < first || year > first + 99 {
            return Err(FormattingError::Year(year));
        }

        Ok(Self {
            year,
            doy: day_of_year(year, month, day),
            hour,
            minute,
            second,
            millisecond: (nanos / 1_000_000) as u16,
        })
    }

    /// Formats the 14 date columns: `YYDDDHHMMSSsss`.
    pub fn format(&self) -> String {
        format!(
            "{:02}{:03}{:02}{:02}{:02}{:03}",
            self.year.rem_euclid(100),
            self.doy,
            self.hour,
            self.minute,
            self.second,
            self.millisecond
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn year_pivot() {
        assert_eq!(expand_year(0), 2000);
        assert_eq!(expand_year(23), 2023);
        assert_eq!(expand_year(49), 2049);
        assert_eq!(expand_year(50), 1950);
        assert_eq!(expand_year(99), 1999);
    }

    #[test]
    fn calendar() {
        assert_eq!(month_day(2023, 1), Some((1, 1)));
        assert_eq!(month_day(2023, 45), Some((2, 14)));
        assert_eq!(month_day(2023, 59), Some((2, 28)));
        assert_eq!(month_day(2023, 60), Some((3, 1)));
        assert_eq!(month_day(2024, 60), Some((2, 29)));
        assert_eq!(month_day(2024, 366), Some((12, 31)));
        assert_eq!(month_day(2023, 366), None);
        assert_eq!(month_day(2023, 0), None);
        assert_eq!(month_day(2000, 366), Some((12, 31)));
        assert_eq!(month_day(1900, 366), None);

        for year in [2023, 2024] {
            for doy in 1..=days_in_year(year) {
                let (m, d) = month_day(year, doy).unwrap();
                assert_eq!(day_of_year(year, m, d), doy);
            }
        }
    }

    #[test]
    fn date_columns() {
        let line = "U2554421123045123456789";
        let fields = DateFields::parse(line).unwrap();
        assert_eq!(
            fields,
            DateFields {
                year: 2023,
                doy: 45,
                hour: 12,
                minute: 34,
                second: 56,
                millisecond: 789,
            }
        );
        assert_eq!(fields.format(), "23045123456789");

        let epoch = fields.to_epoch().unwrap();
        assert_eq!(
            epoch,
            Epoch::from_gregorian_utc(2023, 2, 14, 12, 34, 56, 789_000_000)
        );
        assert_eq!(DateFields::from_epoch(epoch).unwrap(), fields);
    }

    #[test]
    fn invalid_dates() {
        for (doy, hour, minute, second) in
            [(0, 0, 0, 0), (366, 0, 0, 0), (1, 24, 0, 0), (1, 0, 60, 0), (1, 0, 0, 60)]
        {
            let fields = DateFields {
                year: 2023,
                doy,
                hour,
                minute,
                second,
                millisecond: 0,
            };
            assert!(
                matches!(fields.to_epoch(), Err(ParsingError::InvalidDate(_))),
                "{:?}",
                fields
            );
        }
    }

    #[test]
    fn year_window() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2050, 1, 1);
        assert!(matches!(
            DateFields::from_epoch(epoch),
            Err(FormattingError::Year(2050))
        ));
        let epoch = Epoch::from_gregorian_utc_at_midnight(1949, 12, 31);
        assert!(DateFields::from_epoch(epoch).is_err());
        let epoch = Epoch::from_gregorian_utc_at_midnight(1950, 1, 1);
        assert_eq!(DateFields::from_epoch(epoch).unwrap().format(), "50001000000000");
    }

    #[test]
    fn ds50() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2000, 1, 1);
        assert!((epoch_to_ds50(epoch) - 18_263.0).abs() < 1.0E-9);
        assert!((epoch_to_ds50(ds50_epoch())).abs() < 1.0E-12);

        let epoch = Epoch::from_gregorian_utc(2023, 2, 14, 12, 34, 56, 789_000_000);
        let days = epoch_to_ds50(epoch);
        assert!((days.floor() - 26_708.0).abs() < 1.0E-12);
        assert_eq!(epoch_from_ds50(days), epoch);
    }
}
