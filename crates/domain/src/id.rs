//! Component identifiers — the names objects are declared and referenced by.
//!
//! Identifiers end up as variable names in the generated firmware, so they
//! follow the usual identifier rules: ASCII letters, digits and underscores,
//! not starting with a digit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a string was rejected as a [`ComponentId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("identifier must not be empty")]
    Empty,

    #[error("identifier must not start with a digit")]
    LeadingDigit,

    #[error("character {0:?} is not allowed, use letters, digits and underscores")]
    InvalidChar(char),
}

/// Unique name of a declared object (sensor, transmitter, climate device, …).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentId(String);

impl ComponentId {
    /// Validate and wrap an identifier.
    ///
    /// # Errors
    ///
    /// Returns an [`IdError`] describing the first rule the value breaks.
    pub fn parse(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        let mut chars = value.chars();
        match chars.next() {
            None => return Err(IdError::Empty),
            Some(first) if first.is_ascii_digit() => return Err(IdError::LeadingDigit),
            Some(_) => {}
        }
        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(IdError::InvalidChar(bad));
        }
        Ok(Self(value))
    }

    /// Build the `n`-th generated identifier for `stem`: `stem_id`, then
    /// `stem_id_2`, `stem_id_3`, …
    ///
    /// Characters not allowed in identifiers are replaced by `_`.
    #[must_use]
    pub fn generated(stem: &str, n: usize) -> Self {
        let mut value: String = stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if value.is_empty() || value.starts_with(|c: char| c.is_ascii_digit()) {
            value.insert(0, '_');
        }
        value.push_str("_id");
        if n > 1 {
            value = format!("{value}_{n}");
        }
        Self(value)
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ComponentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ComponentId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ComponentId> for String {
    fn from(id: ComponentId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_snake_case_identifier() {
        let id = ComponentId::parse("temp_sensor_1").unwrap();
        assert_eq!(id.as_str(), "temp_sensor_1");
    }

    #[test]
    fn should_accept_leading_underscore() {
        assert!(ComponentId::parse("_hidden").is_ok());
    }

    #[test]
    fn should_reject_empty_identifier() {
        assert_eq!(ComponentId::parse(""), Err(IdError::Empty));
    }

    #[test]
    fn should_reject_identifier_starting_with_digit() {
        assert_eq!(ComponentId::parse("1ac"), Err(IdError::LeadingDigit));
    }

    #[test]
    fn should_reject_identifier_with_dash() {
        assert_eq!(
            ComponentId::parse("living-room"),
            Err(IdError::InvalidChar('-'))
        );
    }

    #[test]
    fn should_generate_first_identifier_without_suffix() {
        let id = ComponentId::generated("whynter_whynterclimate", 1);
        assert_eq!(id.as_str(), "whynter_whynterclimate_id");
    }

    #[test]
    fn should_suffix_later_generated_identifiers() {
        let id = ComponentId::generated("sensor_sensor", 3);
        assert_eq!(id.as_str(), "sensor_sensor_id_3");
    }

    #[test]
    fn should_sanitize_generated_identifiers() {
        let id = ComponentId::generated("9 lives", 1);
        assert_eq!(id.as_str(), "_9_lives_id");
        assert!(ComponentId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn should_display_raw_identifier() {
        let id: ComponentId = "ac1".parse().unwrap();
        assert_eq!(id.to_string(), "ac1");
    }

    #[test]
    fn should_deserialize_from_json_string() {
        let id: ComponentId = serde_json::from_str("\"ac2\"").unwrap();
        assert_eq!(id.as_str(), "ac2");
    }

    #[test]
    fn should_fail_deserializing_invalid_identifier() {
        let result = serde_json::from_str::<ComponentId>("\"not valid\"");
        assert!(result.is_err());
    }
}
