use strum_macros::{Display, EnumIter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference frame of the angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Equinox {
    /// True Equator, Mean Equinox
    #[strum(serialize = "TEME")]
    Teme,
    /// Mean equator and equinox of the year of observation
    #[strum(serialize = "YEAR")]
    MeanOfYear,
    /// J2000
    #[strum(serialize = "J2K")]
    J2000,
    /// B1950
    #[strum(serialize = "1950")]
    B1950,
}

impl Equinox {
    /// Code written in the equinox column.
    pub const fn code(&self) -> char {
        match self {
            Self::Teme => '0',
            Self::MeanOfYear => '1',
            Self::J2000 => '2',
            Self::B1950 => '3',
        }
    }

    /// A blank column stands for TEME.
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            ' ' | '0' => Some(Self::Teme),
            '1' => Some(Self::MeanOfYear),
            '2' => Some(Self::J2000),
            '3' => Some(Self::B1950),
            _ => None,
        }
    }
}
