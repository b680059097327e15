//! Avro schema loading and field type classification.
//!
//! The converter only understands flat record schemas whose fields are Avro
//! primitives. [`load_record_schema()`] enforces the record root, and
//! [`FieldKind::from_avro()`] classifies each field type, rejecting anything
//! composite, named, or logical.

use std::{fmt, fs, ops::Deref, path::Path};

use apache_avro::{
    Schema,
    schema::{RecordField, SchemaKind},
};
use log::debug;

use crate::error::Error;

/// Primitive Avro types a delimited column can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Null,
}

impl FieldKind {
    /// Classifies the declared type of the field `field`.
    pub fn from_avro(field: &str, schema: &Schema) -> Result<Self, Error> {
        let kind = match schema {
            Schema::String => FieldKind::String,
            Schema::Int => FieldKind::Int,
            Schema::Long => FieldKind::Long,
            Schema::Float => FieldKind::Float,
            Schema::Double => FieldKind::Double,
            Schema::Boolean => FieldKind::Boolean,
            Schema::Null => FieldKind::Null,
            other => {
                return Err(Error::UnsupportedType {
                    field: field.to_string(),
                    kind: describe_schema(other),
                });
            }
        };
        Ok(kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Long => "long",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::Boolean => "boolean",
            FieldKind::Null => "null",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn describe_schema(schema: &Schema) -> String {
    format!("{:?}", SchemaKind::from(schema)).to_ascii_lowercase()
}

/// An Avro schema whose root is known to be a record.
///
/// Only [`parse_record_schema()`] and [`load_record_schema()`] build one, so
/// holders never have to handle a non-record root. Derefs to the underlying
/// [`Schema`] for encoding.
#[derive(Debug, Clone)]
pub struct RecordRoot {
    schema: Schema,
}

impl RecordRoot {
    /// Declared fields in order.
    pub fn fields(&self) -> &[RecordField] {
        record_fields(&self.schema).unwrap_or_default()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Deref for RecordRoot {
    type Target = Schema;

    fn deref(&self) -> &Schema {
        &self.schema
    }
}

/// Reads and parses an `.avsc` file, requiring a record at the root.
pub fn load_record_schema(path: &Path) -> Result<RecordRoot, Error> {
    if path.as_os_str().is_empty() {
        return Err(Error::SchemaLoad {
            path: path.to_path_buf(),
            reason: "no schema specified".to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|err| Error::SchemaLoad {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    let root = parse_record_schema(&text).map_err(|reason| Error::SchemaLoad {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!(
        "Loaded record schema from {:?} with {} field(s)",
        path,
        root.fields().len()
    );
    Ok(root)
}

/// Parses schema JSON, returning a readable reason when it is malformed or
/// its root is not a record.
pub fn parse_record_schema(text: &str) -> Result<RecordRoot, String> {
    let schema = Schema::parse_str(text).map_err(|err| err.to_string())?;
    if record_fields(&schema).is_none() {
        return Err(format!(
            "root schema must be a record, found {}",
            describe_schema(&schema)
        ));
    }
    Ok(RecordRoot { schema })
}

/// Returns the declared fields when `schema` is a record.
pub fn record_fields(schema: &Schema) -> Option<&[RecordField]> {
    match schema {
        Schema::Record(record) => Some(record.fields.as_slice()),
        _ => None,
    }
}
