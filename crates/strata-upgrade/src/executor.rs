//! Upgrade step execution.
//!
//! [`UpgradeRunner`] takes steps in the order the caller supplies them. For
//! each step it resolves every edit against the schema snapshot, renders the
//! resulting changes through the dialect and only then hands the statements
//! to the [`SqlExecutor`]. A step whose edits cannot be resolved or rendered
//! runs no SQL at all.

use std::convert::Infallible;
use std::fmt;

use serde::{Deserialize, Serialize};
use strata_sql_core::SqlDialect;
use tracing::{debug, info};

use crate::error::{Result, UpgradeError};
use crate::history::UpgradeHistory;
use crate::operations::SchemaEdit;
use crate::state::SchemaSnapshot;

/// Runs SQL statements against a database.
pub trait SqlExecutor {
    /// The error a failed statement produces.
    type Error: fmt::Display;

    /// Executes one statement.
    ///
    /// # Errors
    ///
    /// Returns the database's error for the statement.
    fn execute(&mut self, sql: &str) -> std::result::Result<(), Self::Error>;
}

/// Collects statements instead of running them.
impl SqlExecutor for Vec<String> {
    type Error = Infallible;

    fn execute(&mut self, sql: &str) -> std::result::Result<(), Self::Error> {
        self.push(sql.to_string());
        Ok(())
    }
}

/// One upgrade step: an id, its place in the sequence and its edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeStep {
    /// Unique step id.
    pub id: String,
    /// Position in the upgrade sequence; must increase from step to step.
    pub sequence: u64,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Edits, applied in order.
    #[serde(default)]
    pub edits: Vec<SchemaEdit>,
}

impl UpgradeStep {
    /// Creates a step with no edits.
    #[must_use]
    pub fn new(id: impl Into<String>, sequence: u64) -> Self {
        Self {
            id: id.into(),
            sequence,
            description: String::new(),
            edits: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds an edit.
    #[must_use]
    pub fn edit(mut self, edit: SchemaEdit) -> Self {
        self.edits.push(edit);
        self
    }

    /// Adds edits.
    #[must_use]
    pub fn edits(mut self, edits: impl IntoIterator<Item = SchemaEdit>) -> Self {
        self.edits.extend(edits);
        self
    }
}

/// Applies upgrade steps through a dialect and an executor.
pub struct UpgradeRunner<D: SqlDialect, E: SqlExecutor> {
    dialect: D,
    executor: E,
    snapshot: SchemaSnapshot,
    history: UpgradeHistory,
    dry_run: bool,
}

impl<D: SqlDialect, E: SqlExecutor> UpgradeRunner<D, E> {
    /// Creates a runner starting from an empty schema and history.
    pub fn new(dialect: D, executor: E) -> Self {
        Self {
            dialect,
            executor,
            snapshot: SchemaSnapshot::new(),
            history: UpgradeHistory::new(),
            dry_run: false,
        }
    }

    /// Starts from an existing schema.
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: SchemaSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// Starts from an existing history.
    #[must_use]
    pub fn with_history(mut self, history: UpgradeHistory) -> Self {
        self.history = history;
        self
    }

    /// Enables dry-run mode (SQL is rendered and logged but not executed).
    #[must_use]
    pub const fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Returns the schema as the applied steps left it.
    #[must_use]
    pub const fn snapshot(&self) -> &SchemaSnapshot {
        &self.snapshot
    }

    /// Returns the upgrade history.
    #[must_use]
    pub const fn history(&self) -> &UpgradeHistory {
        &self.history
    }

    /// Consumes the runner, returning the executor, snapshot and history.
    pub fn into_parts(self) -> (E, SchemaSnapshot, UpgradeHistory) {
        (self.executor, self.snapshot, self.history)
    }

    /// Renders a step against the current snapshot without applying it.
    ///
    /// Rendering a temporary-table deployment or drop still updates the
    /// dialect's temporary-table registry.
    ///
    /// # Errors
    ///
    /// Fails if an edit does not fit the snapshot or cannot be rendered.
    pub fn sql_for(&self, step: &UpgradeStep) -> Result<Vec<String>> {
        let mut snapshot = self.snapshot.clone();
        self.render(&mut snapshot, step)
    }

    fn render(&self, snapshot: &mut SchemaSnapshot, step: &UpgradeStep) -> Result<Vec<String>> {
        let mut statements = Vec::new();
        for edit in &step.edits {
            let change = snapshot.apply(edit)?;
            let rendered = self.dialect.schema_change_statements(&change)?;
            debug!(
                step = %step.id,
                change = change.kind(),
                subject = change.subject(),
                statements = rendered.len(),
                "Rendered schema change"
            );
            statements.extend(rendered);
        }
        Ok(statements)
    }

    /// Applies a single step and returns the statements it ran.
    ///
    /// The snapshot and history only move forward once every statement has
    /// been executed.
    ///
    /// # Errors
    ///
    /// Fails if the step is out of order, an edit does not fit the snapshot,
    /// a change cannot be rendered or the executor rejects a statement.
    pub fn apply(&mut self, step: &UpgradeStep) -> Result<Vec<String>> {
        self.history.check_next(step)?;

        info!(
            id = %step.id,
            sequence = step.sequence,
            description = %step.description,
            "Applying upgrade step"
        );

        let mut snapshot = self.snapshot.clone();
        let statements = self.render(&mut snapshot, step)?;

        for sql in &statements {
            debug!(sql = %sql, "Executing SQL");
            if !self.dry_run {
                self.executor
                    .execute(sql)
                    .map_err(|e| UpgradeError::Executor {
                        step: step.id.clone(),
                        message: e.to_string(),
                    })?;
            }
        }

        self.snapshot = snapshot;
        self.history.record_applied(step);

        info!(
            id = %step.id,
            statements = statements.len(),
            "Upgrade step applied"
        );
        Ok(statements)
    }

    /// Applies steps in the order given, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first step's error; earlier steps stay applied.
    pub fn apply_all<'a>(
        &mut self,
        steps: impl IntoIterator<Item = &'a UpgradeStep>,
    ) -> Result<Vec<String>> {
        let mut statements = Vec::new();
        for step in steps {
            statements.extend(self.apply(step)?);
        }
        Ok(statements)
    }
}

impl<D: SqlDialect + fmt::Debug, E: SqlExecutor> fmt::Debug for UpgradeRunner<D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpgradeRunner")
            .field("dialect", &self.dialect)
            .field("snapshot", &self.snapshot)
            .field("history", &self.history)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}
