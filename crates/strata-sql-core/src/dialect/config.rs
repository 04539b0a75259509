//! Dialect configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by every dialect.
///
/// ```rust
/// use strata_sql_core::dialect::DialectConfig;
///
/// let config = DialectConfig::from_json(r#"{ "schema_name": "core" }"#).unwrap();
/// assert_eq!(config.schema_name(), Some("core"));
/// assert_eq!(DialectConfig::from_json("{}").unwrap(), DialectConfig::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Schema that unqualified tables live in. `None` leaves them unqualified.
    pub schema_name: Option<String>,
}

impl DialectConfig {
    /// A configuration targeting `schema`.
    #[must_use]
    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            schema_name: Some(schema.into()),
        }
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Fails if the text is not a valid configuration object.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The schema name, treating a blank name as absent.
    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        self.schema_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_schema_is_absent() {
        assert_eq!(DialectConfig::with_schema("  ").schema_name(), None);
        assert_eq!(DialectConfig::default().schema_name(), None);
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = DialectConfig::with_schema("core");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(DialectConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(DialectConfig::from_json("{ \"schema_name\": 3 }").is_err());
    }
}
