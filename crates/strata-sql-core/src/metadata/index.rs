//! Index metadata.

use serde::{Deserialize, Serialize};

/// Metadata for a table index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed column names, in key order.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    #[serde(default)]
    pub unique: bool,
}

/// Creates a non-unique index with no columns.
#[must_use]
pub fn index(name: impl Into<String>) -> Index {
    Index {
        name: name.into(),
        columns: Vec::new(),
        unique: false,
    }
}

impl Index {
    /// Sets the indexed columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the index as unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Renames the index, keeping its columns and uniqueness.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: self.columns.clone(),
            unique: self.unique,
        }
    }

    /// Returns true if the index covers the named column (ignoring case).
    #[must_use]
    pub fn references_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.eq_ignore_ascii_case(column))
    }

    /// Replaces references to `from` with `to`.
    #[must_use]
    pub fn with_column_renamed(mut self, from: &str, to: &str) -> Self {
        for column in &mut self.columns {
            if column.eq_ignore_ascii_case(from) {
                *column = to.to_string();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_builder() {
        let idx = index("Agreement_1").columns(["agreementNumber", "code"]).unique();
        assert_eq!(idx.name, "Agreement_1");
        assert_eq!(idx.columns, vec!["agreementNumber", "code"]);
        assert!(idx.unique);
        assert!(idx.references_column("CODE"));
        assert!(!idx.references_column("other"));
    }

    #[test]
    fn test_renamed_keeps_shape() {
        let idx = index("Old").columns(["a"]).unique();
        let renamed = idx.renamed("New");
        assert_eq!(renamed.name, "New");
        assert_eq!(renamed.columns, idx.columns);
        assert!(renamed.unique);
    }

    #[test]
    fn test_column_renamed() {
        let idx = index("I").columns(["a", "b"]).with_column_renamed("B", "c");
        assert_eq!(idx.columns, vec!["a", "c"]);
    }
}
