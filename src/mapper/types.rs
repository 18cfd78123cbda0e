//! Field kind to MySQL column type mapping.
//!
//! Handles:
//! - Integer kinds (TINYINT, SMALLINT, INTEGER, BIGINT, with UNSIGNED)
//! - Float kinds (FLOAT, DOUBLE)
//! - String kinds (VARCHAR, TEXT, VARBINARY)
//! - Booleans as TINYINT(1) and times as DATETIME(6)
//! - Nullability, AUTO_INCREMENT and DEFAULT suffixes

use crate::describe::{FieldDescription, FieldKind};

/// Default `VARCHAR` length; 191 * 4 bytes fits the InnoDB index prefix limit.
pub const DEFAULT_VARCHAR_SIZE: u32 = 191;

/// Default `VARBINARY` length
pub const DEFAULT_VARBINARY_SIZE: u32 = 767;

/// Why a field could not be given a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    Unsupported,
    InvalidSize(u32),
}

/// Type mapper for the MySQL family
pub struct TypeMapper;

impl TypeMapper {
    /// Render the full column type fragment for a field
    pub fn column_type(field: &FieldDescription) -> Result<String, TypeError> {
        let mut result = match (&field.sql_type, field.size) {
            // A raw type carries its own length
            (Some(_), Some(size)) => return Err(TypeError::InvalidSize(size)),
            (Some(raw), None) => raw.clone(),
            (None, size) => Self::base_type(&field.kind, size)?,
        };

        if Self::is_nullable(field) {
            result.push_str(" NULL");
        } else {
            result.push_str(" NOT NULL");
        }

        if field.auto_increment {
            result.push_str(" AUTO_INCREMENT");
        }

        if let Some(default) = &field.default {
            result.push_str(" DEFAULT ");
            result.push_str(default);
        }

        Ok(result)
    }

    /// Map a kind to its bare SQL type, without nullability
    pub fn base_type(kind: &FieldKind, size: Option<u32>) -> Result<String, TypeError> {
        // A nullable of a nullable has no SQL meaning
        if kind.non_null().is_nullable() {
            return Err(TypeError::Unsupported);
        }

        if let Some(size) = size {
            let sized = matches!(kind.non_null(), FieldKind::String | FieldKind::Bytes);
            if size == 0 || !sized {
                return Err(TypeError::InvalidSize(size));
            }
        }

        let ty = match kind {
            FieldKind::Bool => "TINYINT(1)".to_string(),
            FieldKind::Int8 => "TINYINT".to_string(),
            FieldKind::Int16 => "SMALLINT".to_string(),
            FieldKind::Int32 => "INTEGER".to_string(),
            FieldKind::Int64 | FieldKind::Int => "BIGINT".to_string(),
            FieldKind::Uint8 => "TINYINT UNSIGNED".to_string(),
            FieldKind::Uint16 => "SMALLINT UNSIGNED".to_string(),
            FieldKind::Uint32 => "INTEGER UNSIGNED".to_string(),
            FieldKind::Uint64 | FieldKind::Uint => "BIGINT UNSIGNED".to_string(),
            FieldKind::Float32 => "FLOAT".to_string(),
            FieldKind::Float64 => "DOUBLE".to_string(),
            FieldKind::String => format!("VARCHAR({})", size.unwrap_or(DEFAULT_VARCHAR_SIZE)),
            FieldKind::Text => "TEXT".to_string(),
            FieldKind::Bytes => {
                format!("VARBINARY({})", size.unwrap_or(DEFAULT_VARBINARY_SIZE))
            }
            FieldKind::Time => "DATETIME(6)".to_string(),
            FieldKind::Nullable(inner) => Self::base_type(inner, size)?,
            FieldKind::Other(_) => return Err(TypeError::Unsupported),
        };

        Ok(ty)
    }

    /// Whether the column admits NULL, from the kind or the `null` flag
    pub fn is_nullable(field: &FieldDescription) -> bool {
        field.null || field.kind.is_nullable()
    }
}

impl FieldKind {
    /// The kind with one level of nullability removed
    fn non_null(&self) -> &FieldKind {
        match self {
            FieldKind::Nullable(inner) => inner,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(kind: FieldKind) -> String {
        TypeMapper::column_type(&FieldDescription::new("f", kind)).unwrap()
    }

    #[test]
    fn test_integers() {
        assert_eq!(ty(FieldKind::Int8), "TINYINT NOT NULL");
        assert_eq!(ty(FieldKind::Int32), "INTEGER NOT NULL");
        assert_eq!(ty(FieldKind::Int), "BIGINT NOT NULL");
        assert_eq!(ty(FieldKind::Uint16), "SMALLINT UNSIGNED NOT NULL");
        assert_eq!(ty(FieldKind::Uint64), "BIGINT UNSIGNED NOT NULL");
    }

    #[test]
    fn test_bool_float_time() {
        assert_eq!(ty(FieldKind::Bool), "TINYINT(1) NOT NULL");
        assert_eq!(ty(FieldKind::Float32), "FLOAT NOT NULL");
        assert_eq!(ty(FieldKind::Float64), "DOUBLE NOT NULL");
        assert_eq!(ty(FieldKind::Time), "DATETIME(6) NOT NULL");
    }

    #[test]
    fn test_strings_and_sizes() {
        assert_eq!(ty(FieldKind::String), "VARCHAR(191) NOT NULL");
        assert_eq!(ty(FieldKind::Text), "TEXT NOT NULL");
        assert_eq!(ty(FieldKind::Bytes), "VARBINARY(767) NOT NULL");

        let field = FieldDescription::new("name", FieldKind::String).size(64);
        assert_eq!(
            TypeMapper::column_type(&field).unwrap(),
            "VARCHAR(64) NOT NULL"
        );

        let field = FieldDescription::new("name", FieldKind::nullable(FieldKind::Bytes)).size(16);
        assert_eq!(TypeMapper::column_type(&field).unwrap(), "VARBINARY(16) NULL");
    }

    #[test]
    fn test_invalid_sizes() {
        let field = FieldDescription::new("n", FieldKind::Int).size(11);
        assert_eq!(
            TypeMapper::column_type(&field),
            Err(TypeError::InvalidSize(11))
        );

        let field = FieldDescription::new("s", FieldKind::String).size(0);
        assert_eq!(
            TypeMapper::column_type(&field),
            Err(TypeError::InvalidSize(0))
        );
    }

    #[test]
    fn test_nullable() {
        assert_eq!(ty(FieldKind::nullable(FieldKind::Int64)), "BIGINT NULL");

        let field = FieldDescription::new("deleted_at", FieldKind::Time).null();
        assert_eq!(TypeMapper::column_type(&field).unwrap(), "DATETIME(6) NULL");
    }

    #[test]
    fn test_suffixes() {
        let field = FieldDescription::new("id", FieldKind::Uint64).auto_increment();
        assert_eq!(
            TypeMapper::column_type(&field).unwrap(),
            "BIGINT UNSIGNED NOT NULL AUTO_INCREMENT"
        );

        let field = FieldDescription::new("created_at", FieldKind::Time)
            .default("CURRENT_TIMESTAMP(6)");
        assert_eq!(
            TypeMapper::column_type(&field).unwrap(),
            "DATETIME(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6)"
        );
    }

    #[test]
    fn test_raw_type_override() {
        let field = FieldDescription::new("price", FieldKind::Other("Decimal".into()))
            .sql_type("DECIMAL(10,2)");
        assert_eq!(
            TypeMapper::column_type(&field).unwrap(),
            "DECIMAL(10,2) NOT NULL"
        );
    }

    #[test]
    fn test_raw_type_rejects_size() {
        let field = FieldDescription::new("uuid", FieldKind::String)
            .sql_type("CHAR(36)")
            .size(0);
        assert_eq!(
            TypeMapper::column_type(&field),
            Err(TypeError::InvalidSize(0))
        );

        let field = FieldDescription::new("uuid", FieldKind::String)
            .sql_type("CHAR(36)")
            .size(36);
        assert_eq!(
            TypeMapper::column_type(&field),
            Err(TypeError::InvalidSize(36))
        );
    }

    #[test]
    fn test_nested_nullable_ignores_size() {
        let nested = FieldKind::nullable(FieldKind::nullable(FieldKind::String));

        let field = FieldDescription::new("s", nested.clone());
        assert_eq!(TypeMapper::column_type(&field), Err(TypeError::Unsupported));

        let field = FieldDescription::new("s", nested).size(32);
        assert_eq!(TypeMapper::column_type(&field), Err(TypeError::Unsupported));
    }

    #[test]
    fn test_is_nullable() {
        assert!(!TypeMapper::is_nullable(&FieldDescription::new("a", FieldKind::Int)));
        assert!(TypeMapper::is_nullable(&FieldDescription::new("a", FieldKind::Int).null()));
        assert!(TypeMapper::is_nullable(&FieldDescription::new(
            "a",
            FieldKind::nullable(FieldKind::Int)
        )));
    }

    #[test]
    fn test_unsupported() {
        let field = FieldDescription::new("cb", FieldKind::Other("func()".into()));
        assert_eq!(TypeMapper::column_type(&field), Err(TypeError::Unsupported));

        let nested = FieldKind::nullable(FieldKind::nullable(FieldKind::Int));
        let field = FieldDescription::new("n", nested);
        assert_eq!(TypeMapper::column_type(&field), Err(TypeError::Unsupported));
    }
}
