//! Declared data kinds of record fields.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Matches the nullable spellings: `option<k>`, `*k` and `k?`
static NULLABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:option\s*<\s*(?P<opt>.+?)\s*>|\*\s*(?P<ptr>.+)|(?P<suffix>.+?)\s*\?)$")
        .unwrap()
});

/// The declared data kind of a field.
///
/// Kinds outside the SQL mapping table are kept as [`FieldKind::Other`] so
/// the mapper can report them by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform-width signed integer, mapped as 64-bit
    Int,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    /// Platform-width unsigned integer, mapped as 64-bit
    Uint,
    Float32,
    Float64,
    /// Bounded string, `VARCHAR`
    String,
    /// Unbounded string, `TEXT`
    Text,
    /// Byte string, `VARBINARY`
    Bytes,
    /// Date and time
    Time,
    /// A kind that also admits NULL
    Nullable(Box<FieldKind>),
    /// Any other declared kind (functions, channels, maps, ...)
    Other(String),
}

impl FieldKind {
    pub fn nullable(inner: FieldKind) -> Self {
        FieldKind::Nullable(Box::new(inner))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, FieldKind::Nullable(_))
    }

    fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "bool" | "boolean" => FieldKind::Bool,
            "int8" | "i8" => FieldKind::Int8,
            "int16" | "i16" => FieldKind::Int16,
            "int32" | "i32" => FieldKind::Int32,
            "int64" | "i64" => FieldKind::Int64,
            "int" | "isize" => FieldKind::Int,
            "uint8" | "u8" => FieldKind::Uint8,
            "uint16" | "u16" => FieldKind::Uint16,
            "uint32" | "u32" => FieldKind::Uint32,
            "uint64" | "u64" => FieldKind::Uint64,
            "uint" | "usize" => FieldKind::Uint,
            "float32" | "f32" => FieldKind::Float32,
            "float64" | "f64" => FieldKind::Float64,
            "string" | "str" => FieldKind::String,
            "text" => FieldKind::Text,
            "bytes" | "[]byte" => FieldKind::Bytes,
            "time" | "datetime" => FieldKind::Time,
            _ => FieldKind::Other(name.to_string()),
        }
    }
}

impl FromStr for FieldKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(caps) = NULLABLE_RE.captures(s) {
            let inner = caps
                .name("opt")
                .or_else(|| caps.name("ptr"))
                .or_else(|| caps.name("suffix"))
                .map(|m| m.as_str())
                .unwrap_or_default();
            let inner: FieldKind = inner.parse()?;
            return Ok(FieldKind::nullable(inner));
        }

        Ok(FieldKind::from_name(s))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Int8 => write!(f, "int8"),
            FieldKind::Int16 => write!(f, "int16"),
            FieldKind::Int32 => write!(f, "int32"),
            FieldKind::Int64 => write!(f, "int64"),
            FieldKind::Int => write!(f, "int"),
            FieldKind::Uint8 => write!(f, "uint8"),
            FieldKind::Uint16 => write!(f, "uint16"),
            FieldKind::Uint32 => write!(f, "uint32"),
            FieldKind::Uint64 => write!(f, "uint64"),
            FieldKind::Uint => write!(f, "uint"),
            FieldKind::Float32 => write!(f, "float32"),
            FieldKind::Float64 => write!(f, "float64"),
            FieldKind::String => write!(f, "string"),
            FieldKind::Text => write!(f, "text"),
            FieldKind::Bytes => write!(f, "bytes"),
            FieldKind::Time => write!(f, "time"),
            FieldKind::Nullable(inner) => write!(f, "option<{}>", inner),
            FieldKind::Other(name) => write!(f, "{}", name),
        }
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<FieldKind> for String {
    fn from(value: FieldKind) -> Self {
        value.to_string()
    }
}
