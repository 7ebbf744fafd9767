#![allow(dead_code)]

use oxide_sql_mssql::prelude::*;

pub fn platform_2008() -> SqlServerPlatform {
    SqlServerPlatform::new(PlatformVersion::SqlServer2008)
}

pub fn compile(platform: &impl AlterTableCompiler, diff: &TableDiff) -> Vec<String> {
    platform
        .alter_table_sql(diff)
        .unwrap_or_else(|e| panic!("Failed to compile diff for {}: {e}", diff.name))
}

pub fn diff_from_json(json: &str) -> TableDiff {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("Invalid diff JSON: {e}\n{json}"))
}

/// The guarded DROP CONSTRAINT emitted for a removed defaulted column.
pub fn guarded_drop(quoted_table: &str, constraint: &str) -> String {
    format!(
        "IF EXISTS(SELECT 1 FROM sys.objects WHERE type_desc = 'DEFAULT_CONSTRAINT' \
         AND name = '{constraint}') BEGIN ALTER TABLE {quoted_table} DROP CONSTRAINT \
         {constraint}; END"
    )
}

/// Position of the first statement containing `needle`.
pub fn position_of(sql: &[String], needle: &str) -> usize {
    sql.iter()
        .position(|s| s.contains(needle))
        .unwrap_or_else(|| panic!("No statement contains {needle:?}:\n{sql:#?}"))
}
