//! Generate MySQL `CREATE TABLE` scripts from record descriptions.
//!
//! Register record descriptions with a [`Maker`], then call
//! [`Maker::generate`] or [`Maker::generate_file`]. Each record becomes one
//! `DROP TABLE IF EXISTS` + `CREATE TABLE` pair, in registration order.

pub mod config;
pub mod describe;
pub mod error;
pub mod ident;
pub mod maker;
pub mod mapper;
pub mod renderer;
pub mod schema;

pub use config::{Config, DbConfig, Driver};
pub use describe::{FieldDescription, FieldKind, Record, RecordDescription};
pub use error::{Error, MappingError};
pub use ident::{quote, unquote};
pub use maker::Maker;
pub use mapper::{map_record, map_records, MapperOptions};
pub use renderer::{RenderConfig, Renderer};
pub use schema::{Column, Table};
