//! Row-lock hints for read queries.
//!
//! SQL Server requests locking behaviour through table hints appended to a
//! table reference (`FROM users WITH (UPDLOCK, ROWLOCK)`). The text appended
//! for each [`LockMode`] comes from a [`LockHintTable`] owned by the
//! platform, so hosts can replace the defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lock mode requested by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    /// No locking; dirty reads allowed.
    None,
    /// Shared lock held until the end of the transaction.
    PessimisticRead,
    /// Update lock held until the end of the transaction.
    PessimisticWrite,
    /// Optimistic locking, handled by the application.
    Optimistic,
}

/// Mapping from lock mode to the SQL text appended after a table reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockHintTable {
    hints: BTreeMap<LockMode, String>,
}

impl Default for LockHintTable {
    fn default() -> Self {
        Self::empty()
            .with(LockMode::None, " WITH (NOLOCK)")
            .with(LockMode::PessimisticRead, " WITH (HOLDLOCK, ROWLOCK)")
            .with(LockMode::PessimisticWrite, " WITH (UPDLOCK, ROWLOCK)")
    }
}

impl LockHintTable {
    /// Creates a table without any hint.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            hints: BTreeMap::new(),
        }
    }

    /// Adds or replaces the hint for a mode.
    #[must_use]
    pub fn with(mut self, mode: LockMode, hint: impl Into<String>) -> Self {
        self.set(mode, hint);
        self
    }

    /// Sets the hint for a mode.
    pub fn set(&mut self, mode: LockMode, hint: impl Into<String>) {
        self.hints.insert(mode, hint.into());
    }

    /// Removes the hint for a mode, returning it.
    pub fn unset(&mut self, mode: LockMode) -> Option<String> {
        self.hints.remove(&mode)
    }

    /// Replaces every entry of the table.
    pub fn replace(&mut self, hints: impl IntoIterator<Item = (LockMode, String)>) {
        self.hints = hints.into_iter().collect();
    }

    /// Returns the hint for a mode.
    #[must_use]
    pub fn get(&self, mode: LockMode) -> Option<&str> {
        self.hints.get(&mode).map(String::as_str)
    }

    /// Returns the number of configured hints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Returns true if no hint is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }
}

impl FromIterator<(LockMode, String)> for LockHintTable {
    fn from_iter<I: IntoIterator<Item = (LockMode, String)>>(iter: I) -> Self {
        Self {
            hints: iter.into_iter().collect(),
        }
    }
}

/// Appends the hint configured for `mode` to a FROM clause fragment.
///
/// Modes without an entry leave the fragment unchanged.
///
/// # Example
///
/// ```rust
/// use oxide_sql_mssql::lock::{LockHintTable, LockMode, append_lock_hint};
///
/// let hints = LockHintTable::default();
/// assert_eq!(
///     append_lock_hint("FROM T", LockMode::PessimisticWrite, &hints),
///     "FROM T WITH (UPDLOCK, ROWLOCK)"
/// );
/// assert_eq!(append_lock_hint("FROM T", LockMode::Optimistic, &hints), "FROM T");
/// ```
#[must_use]
pub fn append_lock_hint(from_clause: &str, mode: LockMode, hints: &LockHintTable) -> String {
    match hints.get(mode) {
        Some(hint) => format!("{from_clause}{hint}"),
        None => from_clause.to_string(),
    }
}
