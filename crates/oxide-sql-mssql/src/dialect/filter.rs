//! Removal of diff noise.
//!
//! A generic schema diff flags changes that SQL Server either cannot
//! express or that do not change the concrete column type:
//!
//! - `unsigned` has no SQL Server equivalent and is always dropped;
//! - `type`/`length` are dropped when both column versions render to the
//!   same SQL type (for example `text` and `json`, which are both
//!   `NVARCHAR(MAX)`).
//!
//! A change left with no property is removed from the diff entirely.

use tracing::debug;

use crate::diff::{ChangedProperty, ColumnChange, TableDiff};
use crate::error::Result;

use super::TypeRenderer;

/// Strips noise from a single column change.
///
/// Returns `None` if nothing is left to change.
///
/// # Errors
///
/// Propagates failures of `renderer` when the type axis has to be compared.
pub fn filter_column_change<R: TypeRenderer + ?Sized>(
    mut change: ColumnChange,
    renderer: &R,
) -> Result<Option<ColumnChange>> {
    if change.changed_properties.remove(&ChangedProperty::Unsigned) {
        debug!(column = %change.old_name, "Ignoring unsigned change");
    }

    if change.has_changed(ChangedProperty::Type) || change.has_changed(ChangedProperty::Length) {
        // Only the type axis is compared, everything else stays at `from`.
        let from_type = renderer.type_declaration(&change.from)?;
        let to_type = renderer.type_declaration(&change.from.with_type_of(&change.column))?;

        if from_type == to_type {
            debug!(
                column = %change.old_name,
                sql_type = %from_type,
                "Ignoring type change with identical SQL type"
            );
            change.changed_properties.remove(&ChangedProperty::Type);
            change.changed_properties.remove(&ChangedProperty::Length);
        }
    }

    if change.is_empty() {
        debug!(column = %change.old_name, "Dropping column change with nothing left to alter");
        return Ok(None);
    }

    Ok(Some(change))
}

/// Strips noise from every changed column of a table diff, removing column
/// changes that end up empty.
///
/// # Errors
///
/// Propagates failures of `renderer`. On error, `diff.changed` holds the
/// changes that had already been filtered.
pub fn filter_table_diff<R: TypeRenderer + ?Sized>(diff: &mut TableDiff, renderer: &R) -> Result<()> {
    let changed = std::mem::take(&mut diff.changed);
    for change in changed {
        if let Some(change) = filter_column_change(change, renderer)? {
            diff.changed.push(change);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::SqlServerTypes;
    use crate::error::DdlError;
    use crate::schema::{ColumnSpec, DefaultValue, LogicalType};
    use crate::version::PlatformVersion;

    fn types() -> SqlServerTypes {
        SqlServerTypes::new(PlatformVersion::SqlServer2008)
    }

    fn props(change: &ColumnChange) -> Vec<ChangedProperty> {
        change.changed_properties.iter().copied().collect()
    }

    #[test]
    fn test_unsigned_only_change_is_dropped() {
        let from = ColumnSpec::new("qty", LogicalType::Integer);
        let to = from.clone().unsigned();
        let change = ColumnChange::between(from, to);
        assert_eq!(props(&change), vec![ChangedProperty::Unsigned]);

        assert!(filter_column_change(change, &types()).unwrap().is_none());
    }

    #[test]
    fn test_unsigned_removed_other_changes_kept() {
        let from = ColumnSpec::new("qty", LogicalType::Integer);
        let to = from.clone().unsigned().not_null();
        let change = filter_column_change(ColumnChange::between(from, to), &types())
            .unwrap()
            .unwrap();

        assert_eq!(props(&change), vec![ChangedProperty::Nullable]);
    }

    #[test]
    fn test_same_sql_type_drops_type_and_length() {
        // Both render as NVARCHAR(MAX).
        let from = ColumnSpec::new("payload", LogicalType::Text);
        let to = ColumnSpec::new("payload", LogicalType::Json).length(10);
        let change = ColumnChange::between(from, to);
        assert_eq!(
            props(&change),
            vec![ChangedProperty::Type, ChangedProperty::Length]
        );

        assert!(filter_column_change(change, &types()).unwrap().is_none());
    }

    #[test]
    fn test_long_string_lengths_collapse_to_max() {
        let from = ColumnSpec::new("body", LogicalType::String).length(5000);
        let to = ColumnSpec::new("body", LogicalType::String).length(6000);
        let change = ColumnChange::between(from, to);

        assert!(filter_column_change(change, &types()).unwrap().is_none());
    }

    #[test]
    fn test_real_length_change_is_kept() {
        let from = ColumnSpec::new("title", LogicalType::String).length(50);
        let to = ColumnSpec::new("title", LogicalType::String).length(100);
        let change = filter_column_change(ColumnChange::between(from, to), &types())
            .unwrap()
            .unwrap();

        assert_eq!(props(&change), vec![ChangedProperty::Length]);
    }

    #[test]
    fn test_same_sql_type_keeps_other_properties() {
        // DATETIME and DATETIMETZ are both DATETIME before 2008.
        let from = ColumnSpec::new("seen_at", LogicalType::DateTime);
        let to = ColumnSpec::new("seen_at", LogicalType::DateTimeTz)
            .default(DefaultValue::Expression("GETDATE()".into()));
        let legacy = SqlServerTypes::new(PlatformVersion::SqlServer2005);

        let change = filter_column_change(ColumnChange::between(from, to), &legacy)
            .unwrap()
            .unwrap();
        assert_eq!(props(&change), vec![ChangedProperty::Default]);
    }

    #[test]
    fn test_type_comparison_ignores_non_type_attributes() {
        // Nullability differs but is not part of the type axis.
        let from = ColumnSpec::new("n", LogicalType::Integer);
        let to = ColumnSpec::new("n", LogicalType::Integer).not_null();
        let change = ColumnChange::new(
            from,
            to,
            [ChangedProperty::Type, ChangedProperty::Nullable],
        );

        let change = filter_column_change(change, &types()).unwrap().unwrap();
        assert_eq!(props(&change), vec![ChangedProperty::Nullable]);
    }

    #[test]
    fn test_renderer_error_propagates() {
        let from = ColumnSpec::new("shape", LogicalType::Blob);
        let to = ColumnSpec::new("shape", LogicalType::Unknown("geometry".into()));
        let result = filter_column_change(ColumnChange::between(from, to), &types());

        assert!(matches!(result, Err(DdlError::UnrenderableType { .. })));
    }

    #[test]
    fn test_filter_table_diff_removes_empty_changes() {
        let mut diff = TableDiff::new("products")
            .change_column(ColumnChange::between(
                ColumnSpec::new("stock", LogicalType::Integer),
                ColumnSpec::new("stock", LogicalType::Integer).unsigned(),
            ))
            .change_column(ColumnChange::between(
                ColumnSpec::new("name", LogicalType::String).length(50),
                ColumnSpec::new("name", LogicalType::String).length(80),
            ))
            .change_column(ColumnChange::between(
                ColumnSpec::new("notes", LogicalType::Text),
                ColumnSpec::new("notes", LogicalType::Json),
            ));

        filter_table_diff(&mut diff, &types()).unwrap();

        let remaining: Vec<&str> = diff.changed.iter().map(|c| c.old_name.as_str()).collect();
        assert_eq!(remaining, vec!["name"]);
    }
}
