//! DDL rendering.
//!
//! Emits one `DROP TABLE IF EXISTS` + `CREATE TABLE` pair per table, in the
//! order given, wrapped in `SET foreign_key_checks` toggles so tables can be
//! recreated in any order.

use crate::ident::quote;
use crate::schema::Table;
use std::io::{self, Write};

pub const DEFAULT_ENGINE: &str = "InnoDB";
pub const DEFAULT_CHARSET: &str = "utf8mb4";

/// Target engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub engine: String,
    pub charset: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

/// Renders tables to a DDL script
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the whole script into a string
    pub fn render_to_string(&self, tables: &[Table]) -> String {
        let mut buf = String::new();

        buf.push_str("SET foreign_key_checks=0;\n");
        for table in tables {
            self.write_table(&mut buf, table);
        }
        buf.push_str("SET foreign_key_checks=1;\n");

        buf
    }

    /// Render the whole script and write it to `w` in one piece
    pub fn render<W: Write + ?Sized>(&self, tables: &[Table], w: &mut W) -> io::Result<()> {
        let buf = self.render_to_string(tables);
        w.write_all(buf.as_bytes())?;

        tracing::debug!(tables = tables.len(), bytes = buf.len(), "rendered ddl");
        Ok(())
    }

    fn write_table(&self, buf: &mut String, table: &Table) {
        let name = quote(&table.name);

        buf.push_str(&format!("DROP TABLE IF EXISTS {};\n\n", name));
        buf.push_str(&format!("CREATE TABLE {} (\n", name));
        for col in &table.columns {
            buf.push_str(&format!("    {} {},\n", quote(&col.name), col.sql_type));
        }

        let pk: Vec<String> = table.primary_key.iter().map(|c| quote(c)).collect();
        buf.push_str(&format!("    PRIMARY KEY ({})\n", pk.join(", ")));
        buf.push_str(&format!(
            ") ENGINE={} DEFAULT CHARACTER SET = '{}';\n\n",
            self.config.engine,
            self.config.charset.replace('\'', "''")
        ));
    }
}
