//! B3 observation record
mod classification;
mod equinox;
mod formatting;
mod kind;
mod parsing;

pub use classification::Classification;
pub use equinox::Equinox;
pub use kind::ObservationType;

use crate::datetime::epoch_to_ds50;
use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sensor position, in kilometers.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorPosition {
    pub x_km: f64,
    pub y_km: f64,
    pub z_km: f64,
}

impl SensorPosition {
    pub fn new(x_km: f64, y_km: f64, z_km: f64) -> Self {
        Self { x_km, y_km, z_km }
    }
}

/// Measured quantities. There is one variant per [ObservationType],
/// holding only what that type defines.
/// Angles are expressed in degrees, ranges in kilometers and
/// time derivatives per second.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Measurement {
    AzEl {
        elevation_deg: f64,
        azimuth_deg: f64,
    },
    AzElRange {
        elevation_deg: f64,
        azimuth_deg: f64,
        range_km: f64,
    },
    AzElRangeRate {
        elevation_deg: f64,
        azimuth_deg: f64,
        range_km: f64,
        range_rate_km_s: f64,
    },
    AzElRangeRates {
        elevation_deg: f64,
        azimuth_deg: f64,
        range_km: f64,
        range_rate_km_s: f64,
        elevation_rate_deg_s: f64,
        azimuth_rate_deg_s: f64,
        range_accel_km_s2: f64,
    },
    RaDec {
        declination_deg: f64,
        right_ascension_deg: f64,
    },
    Range {
        range_km: f64,
    },
    AzElPosition {
        elevation_deg: f64,
        azimuth_deg: f64,
        position: SensorPosition,
    },
    RaDecPosition {
        declination_deg: f64,
        right_ascension_deg: f64,
        position: SensorPosition,
    },
}

impl Measurement {
    /// [ObservationType] of this [Measurement].
    pub fn observation_type(&self) -> ObservationType {
        match self {
            Self::AzEl { .. } => ObservationType::AzEl,
            Self::AzElRange { .. } => ObservationType::AzElRange,
            Self::AzElRangeRate { .. } => ObservationType::AzElRangeRate,
            Self::AzElRangeRates { .. } => ObservationType::AzElRangeRates,
            Self::RaDec { .. } => ObservationType::RaDec,
            Self::Range { .. } => ObservationType::Range,
            Self::AzElPosition { .. } => ObservationType::AzElPosition,
            Self::RaDecPosition { .. } => ObservationType::RaDecPosition,
        }
    }

    /// Elevation, or declination for right ascension types.
    pub fn elevation_or_declination_deg(&self) -> Option<f64> {
        match self {
            Self::AzEl { elevation_deg, .. }
            | Self::AzElRange { elevation_deg, .. }
            | Self::AzElRangeRate { elevation_deg, .. }
            | Self::AzElRangeRates { elevation_deg, .. }
            | Self::AzElPosition { elevation_deg, .. } => Some(*elevation_deg),
            Self::RaDec {
                declination_deg, ..
            }
            | Self::RaDecPosition {
                declination_deg, ..
            } => Some(*declination_deg),
            Self::Range { .. } => None,
        }
    }

    /// Azimuth, or right ascension for right ascension types.
    pub fn azimuth_or_right_ascension_deg(&self) -> Option<f64> {
        match self {
            Self::AzEl { azimuth_deg, .. }
            | Self::AzElRange { azimuth_deg, .. }
            | Self::AzElRangeRate { azimuth_deg, .. }
            | Self::AzElRangeRates { azimuth_deg, .. }
            | Self::AzElPosition { azimuth_deg, .. } => Some(*azimuth_deg),
            Self::RaDec {
                right_ascension_deg,
                ..
            }
            | Self::RaDecPosition {
                right_ascension_deg,
                ..
            } => Some(*right_ascension_deg),
            Self::Range { .. } => None,
        }
    }

    pub fn range_km(&self) -> Option<f64> {
        match self {
            Self::AzElRange { range_km, .. }
            | Self::AzElRangeRate { range_km, .. }
            | Self::AzElRangeRates { range_km, .. }
            | Self::Range { range_km } => Some(*range_km),
            _ => None,
        }
    }

    pub fn range_rate_km_s(&self) -> Option<f64> {
        match self {
            Self::AzElRangeRate {
                range_rate_km_s, ..
            }
            | Self::AzElRangeRates {
                range_rate_km_s, ..
            } => Some(*range_rate_km_s),
            _ => None,
        }
    }

    pub fn elevation_rate_deg_s(&self) -> Option<f64> {
        match self {
            Self::AzElRangeRates {
                elevation_rate_deg_s,
                ..
            } => Some(*elevation_rate_deg_s),
            _ => None,
        }
    }

    pub fn azimuth_rate_deg_s(&self) -> Option<f64> {
        match self {
            Self::AzElRangeRates {
                azimuth_rate_deg_s, ..
            } => Some(*azimuth_rate_deg_s),
            _ => None,
        }
    }

    pub fn range_accel_km_s2(&self) -> Option<f64> {
        match self {
            Self::AzElRangeRates {
                range_accel_km_s2, ..
            } => Some(*range_accel_km_s2),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<SensorPosition> {
        match self {
            Self::AzElPosition { position, .. } | Self::RaDecPosition { position, .. } => {
                Some(*position)
            },
            _ => None,
        }
    }
}

/// One B3 [Observation].
///
/// Built either by [Observation::parse] or from an external source
/// (see [Observation::new] and [Observation::from_catalog]).
/// Lines are generated with [Observation::format_line].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Security classification
    pub classification: Classification,
    /// Satellite number (5 digits)
    pub satellite: u32,
    /// Sensor number (3 digits)
    pub sensor: u16,
    /// Observation [Epoch] (UTC)
    pub epoch: Epoch,
    /// Measured quantities
    pub measurement: Measurement,
    /// Reference frame of the angles
    pub equinox: Option<Equinox>,
    /// Track position indicator
    pub track_position: Option<u8>,
    /// Astat flag
    pub astat: Option<u8>,
    /// Sensor assigned satellite number
    pub site_tag: Option<u32>,
    /// SPADOC assigned satellite number
    pub spadoc_tag: Option<u32>,
    /// Line this [Observation] was parsed from
    #[cfg_attr(feature = "serde", serde(skip))]
    source: Option<String>,
}

impl PartialEq for Observation {
    /// Source lines are diagnostics and do not take part in comparisons.
    fn eq(&self, other: &Self) -> bool {
        self.classification == other.classification
            && self.satellite == other.satellite
            && self.sensor == other.sensor
            && self.epoch == other.epoch
            && self.measurement == other.measurement
            && self.equinox == other.equinox
            && self.track_position == other.track_position
            && self.astat == other.astat
            && self.site_tag == other.site_tag
            && self.spadoc_tag == other.spadoc_tag
    }
}

impl Observation {
    /// Builds a new unclassified [Observation] in the TEME frame.
    pub fn new(satellite: u32, sensor: u16, epoch: Epoch, measurement: Measurement) -> Self {
        Self {
            classification: Classification::default(),
            satellite,
            sensor,
            epoch,
            measurement,
            equinox: Some(Equinox::Teme),
            track_position: None,
            astat: None,
            site_tag: None,
            spadoc_tag: None,
            source: None,
        }
    }

    /// Copies and returns [Observation] with desired [Classification].
    pub fn with_classification(&self, classification: Classification) -> Self {
        let mut s = self.clone();
        s.classification = classification;
        s
    }

    /// Copies and returns [Observation] with desired [Equinox].
    pub fn with_equinox(&self, equinox: Equinox) -> Self {
        let mut s = self.clone();
        s.equinox = Some(equinox);
        s
    }

    pub fn with_track_position(&self, indicator: u8) -> Self {
        let mut s = self.clone();
        s.track_position = Some(indicator);
        s
    }

    pub fn with_astat(&self, astat: u8) -> Self {
        let mut s = self.clone();
        s.astat = Some(astat);
        s
    }

    pub fn with_site_tag(&self, tag: u32) -> Self {
        let mut s = self.clone();
        s.site_tag = Some(tag);
        s
    }

    pub fn with_spadoc_tag(&self, tag: u32) -> Self {
        let mut s = self.clone();
        s.spadoc_tag = Some(tag);
        s
    }

    /// [ObservationType] of this [Observation].
    pub fn observation_type(&self) -> ObservationType {
        self.measurement.observation_type()
    }

    /// Observation epoch as fractional days since 1949-12-31T00:00:00 UTC.
    pub fn ds50_utc(&self) -> f64 {
        epoch_to_ds50(self.epoch)
    }

    /// Line this [Observation] was parsed from, if any.
    pub fn source_line(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// True when any trailing tag (track, astat, site, SPADOC) is set.
    pub(crate) fn has_trailing_tags(&self) -> bool {
        self.track_position.is_some()
            || self.astat.is_some()
            || self.site_tag.is_some()
            || self.spadoc_tag.is_some()
    }
}

#[cfg(test)]
mod test {
    use super::{Measurement, Observation, ObservationType, SensorPosition};
    use hifitime::Epoch;

    #[test]
    fn accessors() {
        let m = Measurement::AzElRangeRate {
            elevation_deg: 10.0,
            azimuth_deg: 20.0,
            range_km: 1000.0,
            range_rate_km_s: -1.5,
        };
        assert_eq!(m.observation_type(), ObservationType::AzElRangeRate);
        assert_eq!(m.elevation_or_declination_deg(), Some(10.0));
        assert_eq!(m.azimuth_or_right_ascension_deg(), Some(20.0));
        assert_eq!(m.range_km(), Some(1000.0));
        assert_eq!(m.range_rate_km_s(), Some(-1.5));
        assert_eq!(m.elevation_rate_deg_s(), None);
        assert_eq!(m.range_accel_km_s2(), None);
        assert_eq!(m.position(), None);

        let m = Measurement::Range { range_km: 500.0 };
        assert_eq!(m.elevation_or_declination_deg(), None);
        assert_eq!(m.azimuth_or_right_ascension_deg(), None);
        assert_eq!(m.range_km(), Some(500.0));

        let position = SensorPosition::new(1.0, 2.0, 3.0);
        let m = Measurement::RaDecPosition {
            declination_deg: -5.0,
            right_ascension_deg: 187.5,
            position,
        };
        assert_eq!(m.observation_type(), ObservationType::RaDecPosition);
        assert_eq!(m.position(), Some(position));
        assert_eq!(m.range_rate_km_s(), None);
    }

    #[test]
    fn builders() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2023, 1, 1);
        let obs = Observation::new(25544, 211, epoch, Measurement::Range { range_km: 500.0 });
        assert!(!obs.has_trailing_tags());
        assert!(obs.source_line().is_none());

        let tagged = obs.with_site_tag(1234).with_astat(3);
        assert!(tagged.has_trailing_tags());
        assert_ne!(tagged, obs);
        assert_eq!(tagged.site_tag, Some(1234));
        assert_eq!(tagged.astat, Some(3));
    }
}
