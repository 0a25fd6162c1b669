use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const ZIP_LEN: usize = 5;

/// Normalized 5-digit postal code.
///
/// A `ZipCode` is guaranteed to be exactly five ASCII digits. Malformed
/// input fails here, before any cache lookup or network call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.chars().count() != ZIP_LEN {
            return Err(ValidationError::ZipWrongLength {
                value: trimmed.to_owned(),
            });
        }

        for (index, ch) in trimmed.chars().enumerate() {
            if !ch.is_ascii_digit() {
                return Err(ValidationError::ZipInvalidChar { ch, index });
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First two digits, used by the coarse state-prefix fallback table.
    pub fn prefix(&self) -> &str {
        &self.0[..2]
    }
}

impl Display for ZipCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ZipCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for ZipCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ZipCode> for String {
    fn from(value: ZipCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_trims_zip() {
        let parsed = ZipCode::parse(" 90210 ").expect("zip should parse");
        assert_eq!(parsed.as_str(), "90210");
        assert_eq!(parsed.prefix(), "90");
    }

    #[test]
    fn rejects_wrong_length() {
        let err = ZipCode::parse("9021").expect_err("must fail");
        assert!(matches!(err, ValidationError::ZipWrongLength { .. }));

        let err = ZipCode::parse("90210-1234").expect_err("must fail");
        assert!(matches!(err, ValidationError::ZipWrongLength { .. }));
    }

    #[test]
    fn rejects_non_digits() {
        let err = ZipCode::parse("9O210").expect_err("must fail");
        assert!(matches!(err, ValidationError::ZipInvalidChar { ch: 'O', index: 1 }));
    }
}
