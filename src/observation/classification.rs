use crate::errors::ParsingError;
use strum_macros::{Display, EnumIter, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Security classification marking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Classification {
    #[default]
    #[strum(serialize = "U")]
    Unclassified,
    #[strum(serialize = "C")]
    Confidential,
    #[strum(serialize = "S")]
    Secret,
}

impl Classification {
    /// Marking character, as written in the first column.
    pub const fn code(&self) -> char {
        match self {
            Self::Unclassified => 'U',
            Self::Confidential => 'C',
            Self::Secret => 'S',
        }
    }

    pub fn from_code(c: char) -> Result<Self, ParsingError> {
        match c {
            'U' => Ok(Self::Unclassified),
            'C' => Ok(Self::Confidential),
            'S' => Ok(Self::Secret),
            c => Err(ParsingError::Classification(c)),
        }
    }

    /// Numerical value used in the structured catalog.
    pub const fn level(&self) -> u8 {
        match self {
            Self::Unclassified => 1,
            Self::Confidential => 2,
            Self::Secret => 3,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Unclassified),
            2 => Some(Self::Confidential),
            3 => Some(Self::Secret),
            _ => None,
        }
    }
}
