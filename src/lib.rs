#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * B3 observation lines: parsing and synthesis.
 *
 * Documentation: https://docs.rs/b3
 */

//! B3 is the fixed column text format sensors use to report space object
//! observations: angles, ranges, range rates and sensor positions.
//!
//! This library parses B3 lines into [prelude::Observation]s and generates
//! B3 lines from [prelude::Observation]s, whether they were parsed or built
//! from another source.
//!
//! ```
//! use b3::prelude::*;
//!
//! let line = "U2554421123045123456789451234 1234567                                     10";
//! let obs = Observation::parse(line).unwrap();
//!
//! assert_eq!(obs.satellite, 25544);
//! assert_eq!(obs.observation_type(), ObservationType::AzEl);
//! assert_eq!(obs.measurement.elevation_or_declination_deg(), Some(45.1234));
//! assert_eq!(obs.format_line().unwrap(), line);
//! ```
//!
//! ## Crate features
//! - `serde`: (de)serialization of all data types
//! - `flate2`: gzip compressed files support, see [prelude::ObservationReader::from_file]

mod buffer;
mod observation;
mod reader;

pub mod catalog;
pub mod codec;
pub mod datetime;
pub mod errors;
pub mod layout;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::{
        buffer::LineBuffer,
        catalog::Catalog,
        errors::{FieldError, FormattingError, ParsingError},
        observation::{
            Classification, Equinox, Measurement, Observation, ObservationType, SensorPosition,
        },
        reader::ObservationReader,
    };

    // pub re-export
    pub use hifitime::prelude::{Duration, Epoch, TimeScale, Unit};
}
