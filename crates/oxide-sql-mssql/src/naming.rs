//! Deterministic constraint names.
//!
//! SQL Server generates its own names for default constraints that are not
//! named explicitly, and those names cannot be predicted when a later
//! migration needs to drop the constraint. Every default constraint created
//! by this crate is therefore named from the table and column it belongs to,
//! and the same function is used again when the constraint is dropped.
//!
//! Names are built from CRC32 checksums so that long or unusual identifiers
//! never exceed the engine's identifier length and never need quoting.
//! Two different `(table, column)` pairs may collide; this is accepted.

/// Prefix for default constraint names.
const DEFAULT_CONSTRAINT_PREFIX: &str = "DF_";

/// Returns the 8-digit uppercase hexadecimal CRC32 of an identifier.
///
/// # Example
///
/// ```rust
/// use oxide_sql_mssql::naming::identifier_hash;
///
/// assert_eq!(identifier_hash("123456789"), "CBF43926");
/// assert_eq!(identifier_hash(""), "00000000");
/// ```
#[must_use]
pub fn identifier_hash(identifier: &str) -> String {
    format!("{:08X}", crc32fast::hash(identifier.as_bytes()))
}

/// Returns the name of the default constraint of `column` in `table`.
///
/// # Example
///
/// ```rust
/// use oxide_sql_mssql::naming::default_constraint_name;
///
/// assert_eq!(default_constraint_name("users", "is_active"), "DF_1483A5E9_1B5771DD");
/// ```
#[must_use]
pub fn default_constraint_name(table: &str, column: &str) -> String {
    format!(
        "{DEFAULT_CONSTRAINT_PREFIX}{}_{}",
        identifier_hash(table),
        identifier_hash(column)
    )
}
