use crate::errors::ParsingError;
use strum_macros::EnumIter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [ObservationType] selects which quantities a B3 line carries,
/// and how its angles are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObservationType {
    /// 1: elevation and azimuth
    AzEl,
    /// 2: elevation, azimuth and range
    AzElRange,
    /// 3: elevation, azimuth, range and range rate
    AzElRangeRate,
    /// 4: elevation, azimuth, range, range rate, angle rates and
    /// range acceleration
    AzElRangeRates,
    /// 5: declination and right ascension (sexagesimal)
    RaDec,
    /// 6: range only
    Range,
    /// 8: elevation and azimuth, with sensor position
    AzElPosition,
    /// 9: declination and right ascension (sexagesimal), with sensor position
    RaDecPosition,
}

impl ObservationType {
    /// Digit written in the observation type column.
    pub const fn code(&self) -> u8 {
        match self {
            Self::AzEl => 1,
            Self::AzElRange => 2,
            Self::AzElRangeRate => 3,
            Self::AzElRangeRates => 4,
            Self::RaDec => 5,
            Self::Range => 6,
            Self::AzElPosition => 8,
            Self::RaDecPosition => 9,
        }
    }

    /// Builds [ObservationType] from its digit.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::AzEl),
            2 => Some(Self::AzElRange),
            3 => Some(Self::AzElRangeRate),
            4 => Some(Self::AzElRangeRates),
            5 => Some(Self::RaDec),
            6 => Some(Self::Range),
            8 => Some(Self::AzElPosition),
            9 => Some(Self::RaDecPosition),
            _ => None,
        }
    }

    /// Azimuth column holds a sexagesimal right ascension.
    pub const fn is_sexagesimal(&self) -> bool {
        matches!(self, Self::RaDec | Self::RaDecPosition)
    }
}

impl std::fmt::Display for ObservationType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for ObservationType {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().chars().next().unwrap_or(' ');
        let code = c.to_digit(10).ok_or(ParsingError::ObservationType(c))?;
        if s.trim().len() != 1 {
            return Err(ParsingError::ObservationType(c));
        }
        Self::from_code(code as u8).ok_or(ParsingError::ObservationType(c))
    }
}
