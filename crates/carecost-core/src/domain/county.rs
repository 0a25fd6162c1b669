use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// 5-digit county FIPS identifier: 2-digit state FIPS + 3-digit county FIPS.
///
/// Immutable once produced; this is the value the geo cascade caches keyed
/// by ZIP and the marketplace client sends as `countyfips`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountyId(String);

impl CountyId {
    /// Parse a complete 5-digit identifier.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.len() != 5 || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ValidationError::InvalidCountyId {
                value: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Build from separate state and county FIPS components, zero-padding
    /// each the way the geocoder returns them.
    pub fn from_parts(state_fips: &str, county_fips: &str) -> Result<Self, ValidationError> {
        let state = state_fips.trim();
        if state.is_empty() || state.len() > 2 || !state.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ValidationError::InvalidStateFips {
                value: state.to_owned(),
            });
        }

        let county = county_fips.trim();
        if county.is_empty() || county.len() > 3 || !county.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ValidationError::InvalidCountyFips {
                value: county.to_owned(),
            });
        }

        Ok(Self(format!("{state:0>2}{county:0>3}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn state_fips(&self) -> &str {
        &self.0[..2]
    }

    pub fn county_fips(&self) -> &str {
        &self.0[2..]
    }
}

impl Display for CountyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CountyId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountyId> for String {
    fn from(value: CountyId) -> Self {
        value.0
    }
}
