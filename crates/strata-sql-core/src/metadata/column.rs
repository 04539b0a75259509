//! Column metadata.

use serde::{Deserialize, Serialize};

use super::DataType;

/// Auto-number start value meaning "use the dialect default of 1".
pub const AUTO_NUMBER_DEFAULT_START: i64 = -1;

/// Metadata for a single table column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Logical data type.
    pub data_type: DataType,
    /// Width (length or precision); only meaningful for strings and decimals.
    #[serde(default)]
    pub width: u32,
    /// Scale; only meaningful for decimals.
    #[serde(default)]
    pub scale: u32,
    /// Whether NULL is allowed.
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Whether values are generated by an autonumber mechanism.
    #[serde(default)]
    pub auto_numbered: bool,
    /// First autonumber value, [`AUTO_NUMBER_DEFAULT_START`] for the default.
    #[serde(default = "default_auto_number_start")]
    pub auto_number_start: i64,
    /// Default value, in its textual form.
    #[serde(default)]
    pub default_value: Option<String>,
}

const fn default_auto_number_start() -> i64 {
    AUTO_NUMBER_DEFAULT_START
}

/// Creates a NOT NULL column with no width, scale or default.
#[must_use]
pub fn column(name: impl Into<String>, data_type: DataType) -> Column {
    Column::new(name, data_type)
}

impl Column {
    /// Creates a NOT NULL column with no width, scale or default.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            width: 0,
            scale: 0,
            nullable: false,
            primary_key: false,
            auto_numbered: false,
            auto_number_start: AUTO_NUMBER_DEFAULT_START,
            default_value: None,
        }
    }

    /// Sets the width.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Sets the scale.
    #[must_use]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Allows NULL values.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as part of the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks the column as auto-numbered from `start`.
    ///
    /// Pass [`AUTO_NUMBER_DEFAULT_START`] to start at 1.
    #[must_use]
    pub fn auto_numbered(mut self, start: i64) -> Self {
        self.auto_numbered = true;
        self.auto_number_start = start;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Renames the column.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The first autonumber value with the sentinel resolved.
    #[must_use]
    pub const fn effective_auto_number_start(&self) -> i64 {
        if self.auto_number_start == AUTO_NUMBER_DEFAULT_START {
            1
        } else {
            self.auto_number_start
        }
    }

    /// The default value, treating an empty or blank string as absent.
    #[must_use]
    pub fn non_blank_default(&self) -> Option<&str> {
        self.default_value
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    /// Returns true if the name matches, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns true if the declared type differs from `other`'s, width and
    /// scale included.
    #[must_use]
    pub fn type_differs_from(&self, other: &Self) -> bool {
        self.data_type != other.data_type
            || self.width != other.width
            || self.scale != other.scale
    }
}
