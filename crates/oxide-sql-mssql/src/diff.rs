//! Table diff representation.
//!
//! A [`TableDiff`] is the input of DDL generation: it lists the columns
//! added to, removed from, changed in, and renamed in a single table. All
//! collections keep insertion order, and statements are emitted in that
//! order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schema::ColumnSpec;

/// A column property that differs between two versions of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangedProperty {
    /// Logical type.
    Type,
    /// String or binary length.
    Length,
    /// Decimal precision.
    Precision,
    /// Decimal scale.
    Scale,
    /// Fixed-length flag.
    Fixed,
    /// Nullability.
    Nullable,
    /// Default value.
    Default,
    /// Unsigned flag.
    Unsigned,
    /// Identity flag.
    Autoincrement,
    /// Collation.
    Collation,
    /// Column name.
    Name,
}

impl ChangedProperty {
    /// Returns true if a change of this property alters the column
    /// definition itself (as opposed to its name or default constraint).
    #[must_use]
    pub const fn alters_definition(self) -> bool {
        !matches!(self, Self::Default | Self::Name | Self::Unsigned)
    }
}

/// Changes to an existing column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnChange {
    /// Name of the column before the change.
    pub old_name: String,
    /// Properties that differ between `from` and `column`.
    pub changed_properties: BTreeSet<ChangedProperty>,
    /// Column definition before the change.
    pub from: ColumnSpec,
    /// Column definition after the change.
    pub column: ColumnSpec,
}

impl ColumnChange {
    /// Creates a column change with an explicit set of changed properties.
    #[must_use]
    pub fn new(
        from: ColumnSpec,
        column: ColumnSpec,
        changed_properties: impl IntoIterator<Item = ChangedProperty>,
    ) -> Self {
        Self {
            old_name: from.name.clone(),
            changed_properties: changed_properties.into_iter().collect(),
            from,
            column,
        }
    }

    /// Creates a column change tagging every property that differs.
    ///
    /// The tags are purely structural. Whether a difference matters for a
    /// given dialect is decided later, when the diff is filtered.
    #[must_use]
    pub fn between(from: ColumnSpec, column: ColumnSpec) -> Self {
        let mut changed = BTreeSet::new();
        if from.logical_type != column.logical_type {
            changed.insert(ChangedProperty::Type);
        }
        if from.length != column.length {
            changed.insert(ChangedProperty::Length);
        }
        if from.precision != column.precision {
            changed.insert(ChangedProperty::Precision);
        }
        if from.scale != column.scale {
            changed.insert(ChangedProperty::Scale);
        }
        if from.fixed != column.fixed {
            changed.insert(ChangedProperty::Fixed);
        }
        if from.nullable != column.nullable {
            changed.insert(ChangedProperty::Nullable);
        }
        if from.default != column.default {
            changed.insert(ChangedProperty::Default);
        }
        if from.unsigned != column.unsigned {
            changed.insert(ChangedProperty::Unsigned);
        }
        if from.autoincrement != column.autoincrement {
            changed.insert(ChangedProperty::Autoincrement);
        }
        if from.collation != column.collation {
            changed.insert(ChangedProperty::Collation);
        }
        if from.name != column.name {
            changed.insert(ChangedProperty::Name);
        }
        Self::new(from, column, changed)
    }

    /// Returns true if `property` is marked as changed.
    #[must_use]
    pub fn has_changed(&self, property: ChangedProperty) -> bool {
        self.changed_properties.contains(&property)
    }

    /// Returns true if no property is marked as changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_properties.is_empty()
    }
}

/// A column renamed without other changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenamedColumn {
    /// Name of the column before the rename.
    pub old_name: String,
    /// The column under its new name.
    pub column: ColumnSpec,
}

/// All column-level changes of one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDiff {
    /// Table name, given unquoted. May be schema-qualified (`dbo.users`).
    ///
    /// Constraint names hash this exact string, so `dbo.users` and
    /// `[dbo].[users]` name constraints differently. Bracketed parts are
    /// not quoted again in statements.
    pub name: String,
    /// New table name, if the table is renamed.
    #[serde(default)]
    pub new_name: Option<String>,
    /// Added columns, in emission order.
    #[serde(default)]
    pub added: Vec<ColumnSpec>,
    /// Removed columns, in emission order.
    #[serde(default)]
    pub removed: Vec<ColumnSpec>,
    /// Changed columns, in emission order.
    #[serde(default)]
    pub changed: Vec<ColumnChange>,
    /// Renamed columns, in emission order.
    #[serde(default)]
    pub renamed: Vec<RenamedColumn>,
}

impl TableDiff {
    /// Creates an empty diff for a table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            new_name: None,
            added: Vec::new(),
            removed: Vec::new(),
            changed: Vec::new(),
            renamed: Vec::new(),
        }
    }

    /// Adds a new column.
    #[must_use]
    pub fn add_column(mut self, column: ColumnSpec) -> Self {
        self.added.push(column);
        self
    }

    /// Removes a column, given as it exists before removal.
    #[must_use]
    pub fn remove_column(mut self, column: ColumnSpec) -> Self {
        self.removed.push(column);
        self
    }

    /// Adds a column change.
    #[must_use]
    pub fn change_column(mut self, change: ColumnChange) -> Self {
        self.changed.push(change);
        self
    }

    /// Renames a column.
    #[must_use]
    pub fn rename_column(mut self, old_name: impl Into<String>, column: ColumnSpec) -> Self {
        self.renamed.push(RenamedColumn {
            old_name: old_name.into(),
            column,
        });
        self
    }

    /// Renames the table.
    #[must_use]
    pub fn rename_to(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = Some(new_name.into());
        self
    }

    /// Gets a changed column by its old name.
    #[must_use]
    pub fn get_changed(&self, old_name: &str) -> Option<&ColumnChange> {
        self.changed.iter().find(|c| c.old_name == old_name)
    }

    /// Returns true if the diff contains no change at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none()
            && self.added.is_empty()
            && self.removed.is_empty()
            && self.changed.is_empty()
            && self.renamed.is_empty()
    }
}
