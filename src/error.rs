//! Error types for schema derivation and DDL generation.
//!
//! Mapping failures are always fatal to the current run. I/O failures are
//! wrapped with the operation and path that produced them; the underlying
//! cause is available through `source()`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to derive a table from a record description.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The resolved table name is empty
    #[error("record {record:?}: table name is empty")]
    EmptyTableName { record: String },

    /// Two records resolved to the same table name
    #[error("record {record:?}: table {table:?} is already defined by record {previous:?}")]
    DuplicateTable {
        record: String,
        table: String,
        previous: String,
    },

    /// The record has no columns left after ignored fields are skipped
    #[error("table {table:?}: record has no columns")]
    NoColumns { table: String },

    /// The resolved column name is empty
    #[error("table {table:?}: field #{index} has an empty column name")]
    EmptyColumnName { table: String, index: usize },

    /// Two fields resolved to the same column name
    #[error("table {table:?}: field {field:?} duplicates column {column:?}")]
    DuplicateColumn {
        table: String,
        field: String,
        column: String,
    },

    /// The field's data kind has no SQL type mapping
    #[error("table {table:?}: field {field:?}: unsupported field type {kind:?}")]
    UnsupportedType {
        table: String,
        field: String,
        kind: String,
    },

    /// A size was given for a kind that doesn't take one, or the size is zero
    #[error("table {table:?}: field {field:?}: invalid size {size} for type {kind:?}")]
    InvalidSize {
        table: String,
        field: String,
        kind: String,
        size: u32,
    },

    /// The explicit primary key names a column that doesn't exist
    #[error("table {table:?}: primary key column {column:?} does not exist")]
    UnknownPrimaryKeyColumn { table: String, column: String },

    /// The explicit primary key names a column more than once
    #[error("table {table:?}: primary key column {column:?} is listed more than once")]
    DuplicatePrimaryKeyColumn { table: String, column: String },

    /// A primary key column admits NULL
    #[error("table {table:?}: primary key column {column:?} must not be nullable")]
    NullablePrimaryKeyColumn { table: String, column: String },

    /// The explicit primary key lists no columns
    #[error("table {table:?}: primary key is declared but lists no columns")]
    EmptyPrimaryKey { table: String },

    /// No primary key is declared and there is no `id` column to fall back on
    #[error("table {table:?}: no primary key declared and no `id` column")]
    MissingPrimaryKey { table: String },
}

/// Errors returned by [`Maker`](crate::Maker) and the config loaders.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse")]
    Mapping(#[from] MappingError),

    #[error("failed to write ddl")]
    Io(#[from] io::Error),

    #[error("failed to open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to generate ddl into {path:?}")]
    Generate {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to load {path:?}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("no output file path configured")]
    MissingOutFilePath,

    #[error("unsupported driver: {0:?} (supported: mysql)")]
    UnsupportedDriver(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
