//! Generation orchestrator.
//!
//! A [`Maker`] accumulates record descriptions, maps them to tables and
//! renders the result.
//!
//! ```
//! use ddl_maker::{Config, FieldDescription, FieldKind, Maker, Record};
//!
//! let mut maker = Maker::new(Config::default()).unwrap();
//! maker.add_struct(
//!     Record::new("User")
//!         .field(FieldDescription::new("ID", FieldKind::Int).primary_key())
//!         .field(FieldDescription::new("Name", FieldKind::String)),
//! );
//!
//! let mut out = Vec::new();
//! maker.generate(&mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("CREATE TABLE `users`"));
//! ```

use crate::config::{Config, Driver};
use crate::describe::RecordDescription;
use crate::error::{Error, Result};
use crate::mapper;
use crate::renderer::Renderer;
use crate::schema::Table;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Drives mapping and rendering for a set of registered records
pub struct Maker {
    config: Config,
    driver: Driver,
    structs: Vec<Box<dyn RecordDescription>>,
    tables: Vec<Table>,
}

impl Maker {
    /// Create a maker, rejecting unsupported drivers
    pub fn new(config: Config) -> Result<Self> {
        let driver = config.driver()?;
        Ok(Self {
            config,
            driver,
            structs: Vec::new(),
            tables: Vec::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Register one record; registration order becomes table order
    pub fn add_struct<R>(&mut self, record: R)
    where
        R: RecordDescription + 'static,
    {
        self.structs.push(Box::new(record));
    }

    /// Register records in order
    pub fn add_structs<I, R>(&mut self, records: I)
    where
        I: IntoIterator<Item = R>,
        R: RecordDescription + 'static,
    {
        for record in records {
            self.add_struct(record);
        }
    }

    /// Number of registered records
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Tables from the last successful [`parse`](Self::parse)
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Map every registered record, stopping at the first error
    pub fn parse(&mut self) -> Result<&[Table]> {
        self.tables.clear();

        let options = self.config.mapper_options();
        self.tables = mapper::map_records(self.structs.iter().map(|s| &**s), &options)?;

        Ok(&self.tables)
    }

    /// Parse and write the DDL script to `w`
    ///
    /// Nothing is written when mapping fails.
    pub fn generate<W: Write + ?Sized>(&mut self, w: &mut W) -> Result<()> {
        self.parse()?;

        let renderer = Renderer::new(self.config.render_config());
        renderer.render(&self.tables, w)?;
        Ok(())
    }

    /// Parse and write the DDL script to the configured output file
    pub fn generate_file(&mut self) -> Result<()> {
        let path = self
            .config
            .out_file_path
            .clone()
            .ok_or(Error::MissingOutFilePath)?;

        let file = File::create(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;

        self.write_file(file, &path).map_err(|source| Error::Generate {
            path: path.clone(),
            source: Box::new(source),
        })?;

        tracing::info!(path = %path.display(), tables = self.tables.len(), "wrote ddl");
        Ok(())
    }

    fn write_file(&mut self, file: File, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(file);
        self.generate(&mut writer)?;

        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;

        tracing::debug!(path = %path.display(), "synced output file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{FieldDescription, FieldKind, Record};
    use crate::error::MappingError;
    use tempfile::TempDir;

    fn user() -> Record {
        Record::new("User")
            .field(FieldDescription::new("ID", FieldKind::Int).primary_key())
            .field(FieldDescription::new("Name", FieldKind::String))
    }

    #[test]
    fn test_new_rejects_driver() {
        let config = Config::default().with_driver("sqlite");
        assert!(matches!(
            Maker::new(config),
            Err(Error::UnsupportedDriver(_))
        ));
    }

    #[test]
    fn test_parse_recomputes_tables() {
        let mut maker = Maker::new(Config::default()).unwrap();
        maker.add_struct(user());
        assert_eq!(maker.parse().unwrap().len(), 1);

        maker.add_struct(Record::new("Bad"));
        assert!(maker.parse().is_err());
        assert!(maker.tables().is_empty());
    }

    #[test]
    fn test_generate_writes_nothing_on_error() {
        let mut maker = Maker::new(Config::default()).unwrap();
        maker.add_struct(user());
        maker.add_struct(
            Record::new("Job")
                .field(FieldDescription::new("ID", FieldKind::Int))
                .field(FieldDescription::new("Run", FieldKind::Other("func()".into()))),
        );

        let mut out = Vec::new();
        let err = maker.generate(&mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::Mapping(MappingError::UnsupportedType { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_generate_file_requires_path() {
        let mut maker = Maker::new(Config::default()).unwrap();
        maker.add_struct(user());
        assert!(matches!(
            maker.generate_file(),
            Err(Error::MissingOutFilePath)
        ));
    }

    #[test]
    fn test_generate_file() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("schema.sql");

        let mut maker = Maker::new(Config::default().with_out_file_path(&out)).unwrap();
        maker.add_struct(user());
        maker.generate_file().unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("SET foreign_key_checks=0;\n"));
        assert!(content.contains("CREATE TABLE `users` ("));
    }
}
