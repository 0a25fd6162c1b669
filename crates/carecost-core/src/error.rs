use thiserror::Error;

/// Validation and contract errors exposed by `carecost-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("zip code must be exactly 5 digits: '{value}'")]
    ZipWrongLength { value: String },
    #[error("zip code contains non-digit character '{ch}' at index {index}")]
    ZipInvalidChar { ch: char, index: usize },

    #[error("state code must be 2 ASCII letters: '{value}'")]
    InvalidStateCode { value: String },

    #[error("state FIPS component must be 1-2 digits: '{value}'")]
    InvalidStateFips { value: String },
    #[error("county FIPS component must be 1-3 digits: '{value}'")]
    InvalidCountyFips { value: String },
    #[error("county identifier must be exactly 5 digits: '{value}'")]
    InvalidCountyId { value: String },

    #[error("age must be between 0 and 120: {value}")]
    AgeOutOfRange { value: u8 },
    #[error("coverage year must be between 2014 and 2100: {value}")]
    YearOutOfRange { value: u16 },
}

/// Construction-time configuration failures.
///
/// These are fatal on purpose: a missing or placeholder marketplace key must
/// surface at startup instead of being masked as a per-request fallback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("marketplace api key is empty")]
    EmptyApiKey,
    #[error("marketplace api key is still the placeholder value")]
    PlaceholderApiKey,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
