//! Generic ALTER TABLE compilation.
//!
//! This is the plain column-by-column translation of a diff. Default
//! constraints are always added in a separate statement after the column,
//! which fails for NOT NULL columns on tables that already hold rows;
//! [`SqlServerPlatform`](super::SqlServerPlatform) handles added columns
//! itself and only delegates what remains.

use crate::diff::{ChangedProperty, ColumnChange, TableDiff};
use crate::error::Result;
use crate::naming::default_constraint_name;
use crate::schema::{ColumnSpec, DefaultValue};

use super::{AlterTableCompiler, TypeRenderer};

/// Column-by-column ALTER TABLE compiler.
#[derive(Debug, Clone, Default)]
pub struct GenericAlterTable<R> {
    renderer: R,
}

impl<R: TypeRenderer> GenericAlterTable<R> {
    /// Creates a compiler rendering types with `renderer`.
    #[must_use]
    pub const fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Returns the type renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    fn add_column_sql(&self, table: &str, column: &ColumnSpec) -> Result<Vec<String>> {
        let quoted_table = self.renderer.quote_identifier(table);
        let mut sql = vec![format!(
            "ALTER TABLE {quoted_table} ADD {}",
            self.renderer.column_declaration(column)?
        )];
        if let Some(default) = column.constraint_default() {
            sql.push(self.add_default_sql(table, column, default)?);
        }
        Ok(sql)
    }

    fn add_default_sql(
        &self,
        table: &str,
        column: &ColumnSpec,
        default: &DefaultValue,
    ) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD CONSTRAINT {} DEFAULT {} FOR {}",
            self.renderer.quote_identifier(table),
            default_constraint_name(table, &column.name),
            self.renderer.render_default(&column.name, default)?,
            self.renderer.quote_column_name(&column.name)
        ))
    }

    fn drop_default_sql(&self, table: &str, column: &str) -> String {
        format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.renderer.quote_identifier(table),
            default_constraint_name(table, column)
        )
    }

    fn rename_column_sql(&self, table: &str, old_name: &str, new_name: &str) -> String {
        format!(
            "EXEC sp_rename {}, {}, 'COLUMN'",
            self.renderer.quote_string(&format!("{table}.{old_name}")),
            self.renderer.quote_string(new_name)
        )
    }

    fn change_column_sql(&self, table: &str, change: &ColumnChange) -> Result<Vec<String>> {
        let mut sql = Vec::new();
        let column = &change.column;

        if change.has_changed(ChangedProperty::Name) && change.old_name != column.name {
            sql.push(self.rename_column_sql(table, &change.old_name, &column.name));
        }

        let alters_definition = change
            .changed_properties
            .iter()
            .any(|p| p.alters_definition());

        // A column cannot be altered while a default constraint depends on it.
        let drop_old_default = change.from.has_default()
            && (change.has_changed(ChangedProperty::Default) || alters_definition);
        if drop_old_default {
            sql.push(self.drop_default_sql(table, &change.old_name));
        }

        if alters_definition {
            sql.push(format!(
                "ALTER TABLE {} ALTER COLUMN {}",
                self.renderer.quote_identifier(table),
                self.renderer.column_declaration(column)?
            ));
        }

        if change.has_changed(ChangedProperty::Default) || drop_old_default {
            if let Some(default) = column.constraint_default() {
                sql.push(self.add_default_sql(table, column, default)?);
            }
        }

        Ok(sql)
    }
}

impl<R: TypeRenderer> AlterTableCompiler for GenericAlterTable<R> {
    fn alter_table_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let table = diff.name.as_str();
        let quoted_table = self.renderer.quote_identifier(table);
        let mut sql = Vec::new();

        for column in &diff.added {
            sql.extend(self.add_column_sql(table, column)?);
        }

        for column in &diff.removed {
            sql.push(format!(
                "ALTER TABLE {quoted_table} DROP COLUMN {}",
                self.renderer.quote_column_name(&column.name)
            ));
        }

        for change in diff.changed.iter().filter(|c| !c.is_empty()) {
            sql.extend(self.change_column_sql(table, change)?);
        }

        for renamed in &diff.renamed {
            sql.push(self.rename_column_sql(table, &renamed.old_name, &renamed.column.name));
        }

        if let Some(new_name) = &diff.new_name {
            sql.push(format!(
                "EXEC sp_rename {}, {}",
                self.renderer.quote_string(table),
                self.renderer.quote_string(new_name)
            ));
        }

        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::SqlServerTypes;
    use crate::schema::LogicalType;
    use crate::version::PlatformVersion;

    fn compiler() -> GenericAlterTable<SqlServerTypes> {
        GenericAlterTable::new(SqlServerTypes::new(PlatformVersion::SqlServer2008))
    }

    #[test]
    fn test_add_column_with_default_uses_two_statements() {
        let diff = TableDiff::new("T").add_column(
            ColumnSpec::new("C", LogicalType::Integer)
                .not_null()
                .default(DefaultValue::Integer(0)),
        );

        let sql = compiler().alter_table_sql(&diff).unwrap();
        assert_eq!(
            sql,
            vec![
                "ALTER TABLE [T] ADD [C] INT NOT NULL".to_string(),
                "ALTER TABLE [T] ADD CONSTRAINT DF_BE047A60_3DD7FFA7 DEFAULT 0 FOR [C]"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_drop_column() {
        let diff = TableDiff::new("users")
            .remove_column(ColumnSpec::new("legacy_flag", LogicalType::Boolean));

        assert_eq!(
            compiler().alter_table_sql(&diff).unwrap(),
            vec!["ALTER TABLE [users] DROP COLUMN [legacy_flag]"]
        );
    }

    #[test]
    fn test_alter_column_definition() {
        let diff = TableDiff::new("users").change_column(ColumnChange::between(
            ColumnSpec::new("score", LogicalType::Integer),
            ColumnSpec::new("score", LogicalType::BigInt).not_null(),
        ));

        assert_eq!(
            compiler().alter_table_sql(&diff).unwrap(),
            vec!["ALTER TABLE [users] ALTER COLUMN [score] BIGINT NOT NULL"]
        );
    }

    #[test]
    fn test_change_default_replaces_constraint() {
        let diff = TableDiff::new("orders").change_column(ColumnChange::between(
            ColumnSpec::new("status", LogicalType::String)
                .length(20)
                .default(DefaultValue::String("new".into())),
            ColumnSpec::new("status", LogicalType::String)
                .length(20)
                .default(DefaultValue::String("open".into())),
        ));

        assert_eq!(
            compiler().alter_table_sql(&diff).unwrap(),
            vec![
                "ALTER TABLE [orders] DROP CONSTRAINT DF_E52FFDEE_7B00651C",
                "ALTER TABLE [orders] ADD CONSTRAINT DF_E52FFDEE_7B00651C DEFAULT 'open' FOR [status]",
            ]
        );
    }

    #[test]
    fn test_drop_default_only() {
        let diff = TableDiff::new("orders").change_column(ColumnChange::between(
            ColumnSpec::new("amount", LogicalType::Integer).default(DefaultValue::Integer(0)),
            ColumnSpec::new("amount", LogicalType::Integer),
        ));

        assert_eq!(
            compiler().alter_table_sql(&diff).unwrap(),
            vec!["ALTER TABLE [orders] DROP CONSTRAINT DF_E52FFDEE_8EA17042"]
        );
    }

    #[test]
    fn test_definition_change_recreates_kept_default() {
        let diff = TableDiff::new("users").change_column(ColumnChange::between(
            ColumnSpec::new("score", LogicalType::Integer).default(DefaultValue::Integer(0)),
            ColumnSpec::new("score", LogicalType::BigInt).default(DefaultValue::Integer(0)),
        ));

        assert_eq!(
            compiler().alter_table_sql(&diff).unwrap(),
            vec![
                "ALTER TABLE [users] DROP CONSTRAINT DF_1483A5E9_32993751",
                "ALTER TABLE [users] ALTER COLUMN [score] BIGINT",
                "ALTER TABLE [users] ADD CONSTRAINT DF_1483A5E9_32993751 DEFAULT 0 FOR [score]",
            ]
        );
    }

    #[test]
    fn test_definition_change_with_null_default_leaves_constraints_alone() {
        let diff = TableDiff::new("users").change_column(ColumnChange::between(
            ColumnSpec::new("score", LogicalType::Integer).default(DefaultValue::Null),
            ColumnSpec::new("score", LogicalType::BigInt).default(DefaultValue::Null),
        ));

        assert_eq!(
            compiler().alter_table_sql(&diff).unwrap(),
            vec!["ALTER TABLE [users] ALTER COLUMN [score] BIGINT"]
        );
    }

    #[test]
    fn test_null_default_creates_no_constraint() {
        let diff = TableDiff::new("T").add_column(
            ColumnSpec::new("A", LogicalType::Integer).default(DefaultValue::Null),
        );

        assert_eq!(
            compiler().alter_table_sql(&diff).unwrap(),
            vec!["ALTER TABLE [T] ADD [A] INT"]
        );
    }

    #[test]
    fn test_dotted_column_name_is_one_identifier() {
        let diff = TableDiff::new("T")
            .add_column(
                ColumnSpec::new("price.usd", LogicalType::Integer).default(DefaultValue::Integer(0)),
            )
            .remove_column(ColumnSpec::new("price.eur", LogicalType::Integer));

        assert_eq!(
            compiler().alter_table_sql(&diff).unwrap(),
            vec![
                "ALTER TABLE [T] ADD [price.usd] INT",
                "ALTER TABLE [T] ADD CONSTRAINT DF_BE047A60_655930AB DEFAULT 0 FOR [price.usd]",
                "ALTER TABLE [T] DROP COLUMN [price.eur]",
            ]
        );
    }

    #[test]
    fn test_renames() {
        let diff = TableDiff::new("users")
            .rename_column("nick", ColumnSpec::new("nickname", LogicalType::String))
            .rename_to("accounts");

        assert_eq!(
            compiler().alter_table_sql(&diff).unwrap(),
            vec![
                "EXEC sp_rename 'users.nick', 'nickname', 'COLUMN'",
                "EXEC sp_rename 'users', 'accounts'",
            ]
        );
    }

    #[test]
    fn test_empty_changes_are_skipped() {
        let col = ColumnSpec::new("a", LogicalType::Integer);
        let diff = TableDiff::new("t").change_column(ColumnChange::between(col.clone(), col));

        assert!(compiler().alter_table_sql(&diff).unwrap().is_empty());
    }
}
