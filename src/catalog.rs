//! Structured observation catalog, keyed by `XA_OBS_*` field names.
//!
//! This is the flat numerical representation astrodynamics toolkits
//! exchange observations with. Every entry is a `f64`, and entries
//! that do not apply to an observation are zero.
use crate::{
    datetime::epoch_from_ds50,
    errors::ParsingError,
    prelude::{Classification, Measurement, Observation, ObservationType, SensorPosition},
};

use std::collections::BTreeMap;

pub const ASTAT: &str = "XA_OBS_ASTAT";
pub const AZORRA: &str = "XA_OBS_AZORRA";
pub const AZRATE: &str = "XA_OBS_AZRATE";
pub const DS50UTC: &str = "XA_OBS_DS50UTC";
pub const ELORDEC: &str = "XA_OBS_ELORDEC";
pub const ELRATE: &str = "XA_OBS_ELRATE";
pub const OBSTYPE: &str = "XA_OBS_OBSTYPE";
pub const POSX: &str = "XA_OBS_POSX";
pub const POSY: &str = "XA_OBS_POSY";
pub const POSZ: &str = "XA_OBS_POSZ";
pub const RANGE: &str = "XA_OBS_RANGE";
pub const RANGEACCEL: &str = "XA_OBS_RANGEACCEL";
pub const RANGERATE: &str = "XA_OBS_RANGERATE";
pub const SATNUM: &str = "XA_OBS_SATNUM";
pub const SECCLASS: &str = "XA_OBS_SECCLASS";
pub const SENNUM: &str = "XA_OBS_SENNUM";
pub const SITETAG: &str = "XA_OBS_SITETAG";
pub const SPADOCTAG: &str = "XA_OBS_SPADOCTAG";
pub const TRACKIND: &str = "XA_OBS_TRACKIND";

/// Every catalog field name, in alphabetical order.
/// Sigmas and velocities are never populated from B3 lines.
pub const XA_OBS_FIELDS: [&str; 44] = [
    ASTAT,
    AZORRA,
    AZRATE,
    DS50UTC,
    ELORDEC,
    ELRATE,
    OBSTYPE,
    POSX,
    POSY,
    POSZ,
    RANGE,
    RANGEACCEL,
    RANGERATE,
    SATNUM,
    SECCLASS,
    SENNUM,
    "XA_OBS_SIGMAEL1",
    "XA_OBS_SIGMAEL10",
    "XA_OBS_SIGMAEL11",
    "XA_OBS_SIGMAEL12",
    "XA_OBS_SIGMAEL13",
    "XA_OBS_SIGMAEL14",
    "XA_OBS_SIGMAEL15",
    "XA_OBS_SIGMAEL16",
    "XA_OBS_SIGMAEL17",
    "XA_OBS_SIGMAEL18",
    "XA_OBS_SIGMAEL19",
    "XA_OBS_SIGMAEL2",
    "XA_OBS_SIGMAEL20",
    "XA_OBS_SIGMAEL21",
    "XA_OBS_SIGMAEL3",
    "XA_OBS_SIGMAEL4",
    "XA_OBS_SIGMAEL5",
    "XA_OBS_SIGMAEL6",
    "XA_OBS_SIGMAEL7",
    "XA_OBS_SIGMAEL8",
    "XA_OBS_SIGMAEL9",
    "XA_OBS_SIGMATYPE",
    SITETAG,
    SPADOCTAG,
    TRACKIND,
    "XA_OBS_VELX",
    "XA_OBS_VELY",
    "XA_OBS_VELZ",
];

/// Catalog of one [Observation].
pub type Catalog = BTreeMap<String, f64>;

fn real(catalog: &Catalog, field: &'static str) -> Result<f64, ParsingError> {
    let value = *catalog
        .get(field)
        .ok_or(ParsingError::MissingCatalogField(field))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParsingError::InvalidCatalogField { field, value })
    }
}

fn integer(catalog: &Catalog, field: &'static str) -> Result<u64, ParsingError> {
    let value = real(catalog, field)?;
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(ParsingError::InvalidCatalogField { field, value });
    }
    Ok(value as u64)
}

/// Optional tags: absent or zero entries are not set.
fn tag(catalog: &Catalog, field: &'static str) -> Result<Option<u64>, ParsingError> {
    match catalog.get(field) {
        None => Ok(None),
        Some(_) => integer(catalog, field).map(|v| if v == 0 { None } else { Some(v) }),
    }
}

/// Single digit tags: absent or zero entries are not set.
fn flag(catalog: &Catalog, field: &'static str) -> Result<Option<u8>, ParsingError> {
    match tag(catalog, field)? {
        Some(v) if v > 9 => Err(ParsingError::InvalidCatalogField {
            field,
            value: v as f64,
        }),
        v => Ok(v.map(|v| v as u8)),
    }
}

fn position(catalog: &Catalog) -> Result<SensorPosition, ParsingError> {
    Ok(SensorPosition::new(
        real(catalog, POSX)?,
        real(catalog, POSY)?,
        real(catalog, POSZ)?,
    ))
}

impl Measurement {
    fn to_catalog(&self, catalog: &mut Catalog) {
        let mut set = |field: &str, value: Option<f64>| {
            if let Some(value) = value {
                catalog.insert(field.to_string(), value);
            }
        };
        set(ELORDEC, self.elevation_or_declination_deg());
        set(AZORRA, self.azimuth_or_right_ascension_deg());
        set(RANGE, self.range_km());
        set(RANGERATE, self.range_rate_km_s());
        set(ELRATE, self.elevation_rate_deg_s());
        set(AZRATE, self.azimuth_rate_deg_s());
        set(RANGEACCEL, self.range_accel_km_s2());
        if let Some(position) = self.position() {
            set(POSX, Some(position.x_km));
            set(POSY, Some(position.y_km));
            set(POSZ, Some(position.z_km));
        }
    }

    fn from_catalog(kind: ObservationType, catalog: &Catalog) -> Result<Self, ParsingError> {
        let measurement = match kind {
            ObservationType::AzEl => Self::AzEl {
                elevation_deg: real(catalog, ELORDEC)?,
                azimuth_deg: real(catalog, AZORRA)?,
            },
            ObservationType::AzElRange => Self::AzElRange {
                elevation_deg: real(catalog, ELORDEC)?,
                azimuth_deg: real(catalog, AZORRA)?,
                range_km: real(catalog, RANGE)?,
            },
            ObservationType::AzElRangeRate => Self::AzElRangeRate {
                elevation_deg: real(catalog, ELORDEC)?,
                azimuth_deg: real(catalog, AZORRA)?,
                range_km: real(catalog, RANGE)?,
                range_rate_km_s: real(catalog, RANGERATE)?,
            },
            ObservationType::AzElRangeRates => Self::AzElRangeRates {
                elevation_deg: real(catalog, ELORDEC)?,
                azimuth_deg: real(catalog, AZORRA)?,
                range_km: real(catalog, RANGE)?,
                range_rate_km_s: real(catalog, RANGERATE)?,
                elevation_rate_deg_s: real(catalog, ELRATE)?,
                azimuth_rate_deg_s: real(catalog, AZRATE)?,
                range_accel_km_s2: real(catalog, RANGEACCEL)?,
            },
            ObservationType::RaDec => Self::RaDec {
                declination_deg: real(catalog, ELORDEC)?,
                right_ascension_deg: real(catalog, AZORRA)?,
            },
            ObservationType::Range => Self::Range {
                range_km: real(catalog, RANGE)?,
            },
            ObservationType::AzElPosition => Self::AzElPosition {
                elevation_deg: real(catalog, ELORDEC)?,
                azimuth_deg: real(catalog, AZORRA)?,
                position: position(catalog)?,
            },
            ObservationType::RaDecPosition => Self::RaDecPosition {
                declination_deg: real(catalog, ELORDEC)?,
                right_ascension_deg: real(catalog, AZORRA)?,
                position: position(catalog)?,
            },
        };
        Ok(measurement)
    }
}

impl Observation {
    /// Exports this [Observation] as a [Catalog]. Every name of
    /// [XA_OBS_FIELDS] is present.
    /// ```
    /// use b3::catalog::{SATNUM, SECCLASS, RANGE};
    /// use b3::prelude::Observation;
    ///
    /// let line = "U2554421123045123456789451234 1234567                                     10";
    /// let catalog = Observation::parse(line).unwrap().to_catalog();
    /// assert_eq!(catalog[SATNUM], 25544.0);
    /// assert_eq!(catalog[SECCLASS], 1.0);
    /// assert_eq!(catalog[RANGE], 0.0);
    /// ```
    pub fn to_catalog(&self) -> Catalog {
        let mut catalog: Catalog = XA_OBS_FIELDS
            .iter()
            .map(|field| (field.to_string(), 0.0))
            .collect();

        catalog.insert(SECCLASS.to_string(), f64::from(self.classification.level()));
        catalog.insert(DS50UTC.to_string(), self.ds50_utc());
        catalog.insert(SATNUM.to_string(), f64::from(self.satellite));
        catalog.insert(SENNUM.to_string(), f64::from(self.sensor));
        catalog.insert(
            OBSTYPE.to_string(),
            f64::from(self.observation_type().code()),
        );

        self.measurement.to_catalog(&mut catalog);

        for (field, value) in [
            (SITETAG, self.site_tag),
            (SPADOCTAG, self.spadoc_tag),
            (TRACKIND, self.track_position.map(u32::from)),
            (ASTAT, self.astat.map(u32::from)),
        ] {
            if let Some(value) = value {
                catalog.insert(field.to_string(), f64::from(value));
            }
        }

        catalog
    }

    /// Rebuilds an [Observation] from a [Catalog].
    /// The catalog carries no frame: the result is expressed in TEME.
    /// Classification, epoch, identifiers, type and every quantity
    /// that type defines are mandatory.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, ParsingError> {
        let level = integer(catalog, SECCLASS)?;
        let classification = Classification::from_level(level as u8)
            .filter(|_| level <= 3)
            .ok_or(ParsingError::InvalidCatalogField {
                field: SECCLASS,
                value: level as f64,
            })?;

        let satellite = integer(catalog, SATNUM)? as u32;

        let sensor = integer(catalog, SENNUM)?;
        if sensor > u64::from(u16::MAX) {
            return Err(ParsingError::InvalidCatalogField {
                field: SENNUM,
                value: sensor as f64,
            });
        }

        let epoch = epoch_from_ds50(real(catalog, DS50UTC)?);

        let code = integer(catalog, OBSTYPE)?;
        let kind = ObservationType::from_code(code as u8)
            .filter(|_| code <= 9)
            .ok_or(ParsingError::InvalidCatalogField {
                field: OBSTYPE,
                value: code as f64,
            })?;

        let measurement = Measurement::from_catalog(kind, catalog)?;

        let mut obs = Observation::new(satellite, sensor as u16, epoch, measurement)
            .with_classification(classification);

        obs.site_tag = tag(catalog, SITETAG)?.map(|v| v as u32);
        obs.spadoc_tag = tag(catalog, SPADOCTAG)?.map(|v| v as u32);
        obs.track_position = flag(catalog, TRACKIND)?;
        obs.astat = flag(catalog, ASTAT)?;

        Ok(obs)
    }
}
