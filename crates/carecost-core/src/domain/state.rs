use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Validated 2-letter USPS state code, normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateCode(String);

impl StateCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.chars().count() != 2 || !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidStateCode {
                value: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// How this state's individual marketplace is operated, which decides
    /// whether the federal marketplace API can serve its plans.
    pub fn marketplace_type(&self) -> MarketplaceType {
        match self.0.as_str() {
            "CA" | "CO" | "CT" | "DC" | "GA" | "ID" | "KY" | "MA" | "MD" | "ME" | "MN" | "NJ"
            | "NM" | "NV" | "NY" | "PA" | "RI" | "VA" | "VT" | "WA" => {
                MarketplaceType::StateExchange
            }
            "AR" | "OR" => MarketplaceType::StateOnFederalPlatform,
            _ => MarketplaceType::Federal,
        }
    }
}

impl Display for StateCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateCode {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for StateCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StateCode> for String {
    fn from(value: StateCode) -> Self {
        value.0
    }
}

/// Three-way marketplace classification used by the eligibility check.
///
/// Plans for `Federal` and `StateOnFederalPlatform` states are served by the
/// federal platform and therefore visible to the marketplace API; true
/// state-run exchanges are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketplaceType {
    Federal,
    StateExchange,
    StateOnFederalPlatform,
}

impl MarketplaceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Federal => "federal",
            Self::StateExchange => "state_exchange",
            Self::StateOnFederalPlatform => "state_on_federal_platform",
        }
    }

    pub const fn served_by_federal_platform(self) -> bool {
        matches!(self, Self::Federal | Self::StateOnFederalPlatform)
    }
}

impl Display for MarketplaceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
