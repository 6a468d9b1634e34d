//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identifier of a headquarters or partner organization.
///
/// Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct OrganizationId(i64);

impl OrganizationId {
    /// Creates an OrganizationId, returning error if not positive.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::out_of_range(
                "organization_id",
                1,
                i64::MAX,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Parses an identifier under a caller-chosen field name.
    pub fn parse_field(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is not numeric", trimmed)))?;
        if value <= 0 {
            return Err(ValidationError::out_of_range(field, 1, i64::MAX, value));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrganizationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field("organization_id", s)
    }
}

impl TryFrom<i64> for OrganizationId {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrganizationId> for i64 {
    fn from(id: OrganizationId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_id_accepts_positive_values() {
        assert_eq!(OrganizationId::new(42).unwrap().value(), 42);
    }

    #[test]
    fn organization_id_rejects_zero_and_negative() {
        assert!(OrganizationId::new(0).is_err());
        assert!(OrganizationId::new(-7).is_err());
    }

    #[test]
    fn organization_id_parses_from_string() {
        let id: OrganizationId = " 17 ".parse().unwrap();
        assert_eq!(id.value(), 17);
    }

    #[test]
    fn organization_id_rejects_non_numeric() {
        let result: Result<OrganizationId, _> = "abc".parse();
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn organization_id_rejects_blank() {
        let result: Result<OrganizationId, _> = "  ".parse();
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn organization_id_serializes_as_number() {
        let id = OrganizationId::new(9).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
        let back: OrganizationId = serde_json::from_str("9").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<OrganizationId>("0").is_err());
    }
}
