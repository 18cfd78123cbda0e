//! Struct-to-table mapping.
//!
//! Derives a [`Table`] from one [`RecordDescription`]:
//! - table name from the override, else the pluralized snake-cased record name
//! - one column per non-ignored field, in declaration order
//! - primary key from the record override, field flags, or an `id` column

mod types;

pub use types::{TypeError, TypeMapper, DEFAULT_VARBINARY_SIZE, DEFAULT_VARCHAR_SIZE};

use crate::describe::RecordDescription;
use crate::error::MappingError;
use crate::schema::{Column, Table};
use heck::ToSnakeCase;
use std::collections::{HashMap, HashSet};

/// Column assumed to be the primary key when none is declared
pub const IMPLICIT_PRIMARY_KEY: &str = "id";

/// Mapper behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapperOptions {
    /// Emit `PRIMARY KEY (id)` when no key is declared, without checking
    /// that an `id` column exists.
    pub implicit_id_primary_key: bool,
}

/// Table name for a record declared as `name`, e.g. `UserProfile` -> `user_profiles`
pub fn table_name_for(name: &str) -> String {
    let snake = name.to_snake_case();
    if snake.is_empty() {
        return snake;
    }
    pluralizer::pluralize(&snake, 2, false)
}

/// Column name for a field declared as `name`, e.g. `UserID` -> `user_id`
pub fn column_name_for(name: &str) -> String {
    name.to_snake_case()
}

/// Map a single record description to a table
pub fn map_record<R>(record: &R, options: &MapperOptions) -> Result<Table, MappingError>
where
    R: RecordDescription + ?Sized,
{
    let name = match record.table_name() {
        Some(name) => name.to_string(),
        None => table_name_for(record.name()),
    };
    if name.is_empty() {
        return Err(MappingError::EmptyTableName {
            record: record.name().to_string(),
        });
    }

    let mut table = Table::new(name);
    let mut seen = HashSet::new();
    let mut nullable = HashSet::new();
    let mut flagged = Vec::new();

    for (index, field) in record.fields().iter().enumerate() {
        if field.ignore {
            continue;
        }

        let column = match &field.column {
            Some(column) => column.clone(),
            None => column_name_for(&field.name),
        };
        if column.is_empty() {
            return Err(MappingError::EmptyColumnName {
                table: table.name,
                index,
            });
        }
        if !seen.insert(column.clone()) {
            return Err(MappingError::DuplicateColumn {
                table: table.name,
                field: field.name.clone(),
                column,
            });
        }

        let sql_type = TypeMapper::column_type(field).map_err(|e| match e {
            TypeError::Unsupported => MappingError::UnsupportedType {
                table: table.name.clone(),
                field: field.name.clone(),
                kind: field.kind.to_string(),
            },
            TypeError::InvalidSize(size) => MappingError::InvalidSize {
                table: table.name.clone(),
                field: field.name.clone(),
                kind: field.kind.to_string(),
                size,
            },
        })?;

        if field.primary_key {
            flagged.push(column.clone());
        }
        if TypeMapper::is_nullable(field) {
            nullable.insert(column.clone());
        }
        table.columns.push(Column::new(column, sql_type));
    }

    if table.columns.is_empty() {
        return Err(MappingError::NoColumns { table: table.name });
    }

    table.primary_key = resolve_primary_key(record.primary_key(), &table, flagged, options)?;

    // MySQL requires every key part to be NOT NULL
    if let Some(column) = table.primary_key.iter().find(|c| nullable.contains(*c)) {
        return Err(MappingError::NullablePrimaryKeyColumn {
            table: table.name.clone(),
            column: column.clone(),
        });
    }

    tracing::debug!(
        record = record.name(),
        table = %table.name,
        columns = table.columns.len(),
        "mapped record"
    );

    Ok(table)
}

/// Map records in order, rejecting table name collisions
pub fn map_records<'a, I, R>(records: I, options: &MapperOptions) -> Result<Vec<Table>, MappingError>
where
    I: IntoIterator<Item = &'a R>,
    R: RecordDescription + ?Sized + 'a,
{
    let mut tables = Vec::new();
    let mut owners: HashMap<String, String> = HashMap::new();

    for record in records {
        let table = map_record(record, options)?;
        if let Some(previous) = owners.insert(table.name.clone(), record.name().to_string()) {
            return Err(MappingError::DuplicateTable {
                record: record.name().to_string(),
                table: table.name,
                previous,
            });
        }
        tables.push(table);
    }

    Ok(tables)
}

fn resolve_primary_key(
    declared: Option<Vec<String>>,
    table: &Table,
    flagged: Vec<String>,
    options: &MapperOptions,
) -> Result<Vec<String>, MappingError> {
    if let Some(columns) = declared {
        if columns.is_empty() {
            return Err(MappingError::EmptyPrimaryKey {
                table: table.name.clone(),
            });
        }

        for (i, column) in columns.iter().enumerate() {
            if !table.has_column(column) {
                return Err(MappingError::UnknownPrimaryKeyColumn {
                    table: table.name.clone(),
                    column: column.clone(),
                });
            }
            if columns[..i].contains(column) {
                return Err(MappingError::DuplicatePrimaryKeyColumn {
                    table: table.name.clone(),
                    column: column.clone(),
                });
            }
        }
        return Ok(columns);
    }

    if !flagged.is_empty() {
        return Ok(flagged);
    }

    if options.implicit_id_primary_key || table.has_column(IMPLICIT_PRIMARY_KEY) {
        return Ok(vec![IMPLICIT_PRIMARY_KEY.to_string()]);
    }

    Err(MappingError::MissingPrimaryKey {
        table: table.name.clone(),
    })
}
