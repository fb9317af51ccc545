use thiserror::Error;

/// Errors raised while encoding or decoding a single fixed width field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("empty field")]
    Empty,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("expected {expected} characters, got {found}")]
    Width { expected: usize, found: usize },
    #[error("value is not finite")]
    NotFinite,
    #[error("negative value {0} is not representable")]
    Negative(f64),
    #[error("value {value} does not fit in {width} digits")]
    Overflow { value: f64, width: usize },
    #[error("exponent {0} outside 0..=9")]
    Exponent(i32),
}

/// Errors raised while parsing a B3 line (malformed input).
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("line too short: {len} characters, at least {min} expected")]
    LineTooShort { len: usize, min: usize },
    #[error("line contains non ASCII characters")]
    NonAscii,
    #[error("invalid {field} (columns {start}..{end}): {source}")]
    Field {
        field: &'static str,
        start: usize,
        end: usize,
        #[source]
        source: FieldError,
    },
    #[error("unknown security classification '{0}'")]
    Classification(char),
    #[error("unknown observation type '{0}'")]
    ObservationType(char),
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
    #[error("missing catalog field {0}")]
    MissingCatalogField(&'static str),
    #[error("invalid catalog field {field}: {value}")]
    InvalidCatalogField { field: &'static str, value: f64 },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while generating a B3 line (encoding overflow).
#[derive(Debug, Error)]
pub enum FormattingError {
    #[error("cannot encode {field}: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: FieldError,
    },
    #[error("satellite number {0} does not fit 5 digits")]
    SatelliteNumber(u32),
    #[error("sensor number {0} does not fit 3 digits")]
    SensorNumber(u16),
    #[error("year {0} outside the 1950..=2049 two digit window")]
    Year(i32),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormattingError {
    pub(crate) fn field(field: &'static str) -> impl FnOnce(FieldError) -> Self {
        move |source| Self::Field { field, source }
    }
}
