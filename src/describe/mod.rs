//! Record descriptions consumed by the mapper.
//!
//! A record description exposes a name, an ordered list of fields and the
//! per-field metadata needed to derive a table: declared kind, optional
//! column-name and type overrides, ignore and primary-key flags.
//!
//! Any type can implement [`RecordDescription`]. [`Record`] is the
//! hand-written adapter used by the CLI; it can be built in code or loaded
//! from a YAML schema file.

mod kind;

pub use kind::FieldKind;

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The shape of one table, as supplied by the caller.
pub trait RecordDescription {
    /// Declared record name, e.g. `User`
    fn name(&self) -> &str;

    /// Fields in declaration order
    fn fields(&self) -> Vec<FieldDescription>;

    /// Explicit table name, overriding the one derived from [`name`](Self::name)
    fn table_name(&self) -> Option<&str> {
        None
    }

    /// Explicit primary key column names, overriding per-field flags
    ///
    /// `Some` with an empty list is a mapping error, not a request for the default.
    fn primary_key(&self) -> Option<Vec<String>> {
        None
    }
}

/// Field metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDescription {
    /// Declared field name, e.g. `UserID`
    pub name: String,
    /// Declared data kind, e.g. `int64` or `option<string>`
    #[schemars(with = "String")]
    pub kind: FieldKind,
    /// Column name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Raw SQL type override, used verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_type: Option<String>,
    /// Length of `string` and `bytes` columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Allow NULL even if the kind is not nullable
    #[serde(default)]
    pub null: bool,
    #[serde(default)]
    pub auto_increment: bool,
    /// Default value expression, emitted as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub primary_key: bool,
    /// Skip this field entirely
    #[serde(default)]
    pub ignore: bool,
}

impl FieldDescription {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            column: None,
            sql_type: None,
            size: None,
            null: false,
            auto_increment: false,
            default: None,
            primary_key: false,
            ignore: false,
        }
    }

    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn null(mut self) -> Self {
        self.null = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }
}

/// A record description held as plain data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    /// Declared record name
    pub name: String,
    /// Table name override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Primary key override (column names)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Vec<String>>,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescription>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            primary_key: None,
            fields: Vec::new(),
        }
    }

    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn field(mut self, field: FieldDescription) -> Self {
        self.fields.push(field);
        self
    }

    /// Parse a YAML list of records
    pub fn list_from_yaml(s: &str) -> Result<Vec<Record>, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(s)
    }

    /// Load a YAML schema file holding a list of records
    pub fn load_all(path: &Path) -> Result<Vec<Record>> {
        let content = fs::read_to_string(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::list_from_yaml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl RecordDescription for Record {
    fn name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<FieldDescription> {
        self.fields.clone()
    }

    fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    fn primary_key(&self) -> Option<Vec<String>> {
        self.primary_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = Record::new("User")
            .field(FieldDescription::new("ID", FieldKind::Int).primary_key())
            .field(FieldDescription::new("Name", FieldKind::String).size(64));

        assert_eq!(record.name(), "User");
        assert_eq!(record.table_name(), None);
        let fields = record.fields();
        assert_eq!(fields.len(), 2);
        assert!(fields[0].primary_key);
        assert_eq!(fields[1].size, Some(64));
    }

    #[test]
    fn test_records_from_yaml() {
        let yaml = r#"
- name: User
  table: accounts
  primary_key: [id]
  fields:
    - name: ID
      kind: int64
      auto_increment: true
    - name: Bio
      kind: option<text>
    - name: Secret
      kind: string
      ignore: true
"#;
        let records = Record::list_from_yaml(yaml).unwrap();
        assert_eq!(records.len(), 1);

        let user = &records[0];
        assert_eq!(user.table_name(), Some("accounts"));
        assert_eq!(user.primary_key(), Some(vec!["id".to_string()]));
        assert_eq!(user.fields[0].kind, FieldKind::Int64);
        assert!(user.fields[0].auto_increment);
        assert_eq!(user.fields[1].kind, FieldKind::nullable(FieldKind::Text));
        assert!(user.fields[2].ignore);
    }

    #[test]
    fn test_unknown_kind_survives_yaml() {
        let yaml = "- name: Job\n  fields:\n    - name: Callback\n      kind: func()\n";
        let records = Record::list_from_yaml(yaml).unwrap();
        assert_eq!(
            records[0].fields[0].kind,
            FieldKind::Other("func()".to_string())
        );
    }
}
