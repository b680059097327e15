//! Field conversion and record assembly.
//!
//! A [`RecordConverter`] is built once from a record schema. It holds one
//! [`FieldConverter`] per declared field, in declaration order, and turns each
//! delimited row into a [`TypedRecord`] by position: column `i` is converted
//! with the converter of field `i`.
//!
//! Rows shorter than the schema are accepted and the missing trailing fields
//! are simply absent from the record; the encoder decides whether that is
//! acceptable. Rows longer than the schema fail with
//! [`Error::ColumnOverflow`].

use std::num::{ParseFloatError, ParseIntError};

use apache_avro::{Schema, types::Value};
use log::debug;
use thiserror::Error as ThisError;

use crate::{
    error::Error,
    schema::{FieldKind, RecordRoot},
};

/// Why a single column could not be parsed as its declared type.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ParseError {
    #[error("invalid integer")]
    Int(#[from] ParseIntError),
    #[error("invalid floating point number")]
    Float(#[from] ParseFloatError),
    #[error("value out of range")]
    OutOfRange,
    #[error("invalid boolean literal")]
    Boolean,
}

/// Stateless string-to-value conversion for one primitive Avro type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConverter {
    kind: FieldKind,
}

impl FieldConverter {
    pub fn new(kind: FieldKind) -> Self {
        Self { kind }
    }

    /// Selects the converter for a field's declared Avro type.
    pub fn for_schema(field: &str, schema: &Schema) -> Result<Self, Error> {
        FieldKind::from_avro(field, schema).map(Self::new)
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn convert(&self, raw: &str) -> Result<Value, ParseError> {
        let value = match self.kind {
            FieldKind::String => Value::String(raw.to_string()),
            FieldKind::Int => Value::Int(raw.parse()?),
            FieldKind::Long => Value::Long(raw.parse()?),
            FieldKind::Float => Value::Float(parse_float::<f32>(raw)?),
            FieldKind::Double => Value::Double(parse_float::<f64>(raw)?),
            FieldKind::Boolean => Value::Boolean(parse_bool(raw)?),
            FieldKind::Null => Value::Null,
        };
        Ok(value)
    }
}

trait Float: std::str::FromStr<Err = ParseFloatError> {
    fn is_infinite(&self) -> bool;
}

impl Float for f32 {
    fn is_infinite(&self) -> bool {
        f32::is_infinite(*self)
    }
}

impl Float for f64 {
    fn is_infinite(&self) -> bool {
        f64::is_infinite(*self)
    }
}

// Finite literals that overflow the target width are rejected instead of
// silently becoming infinity.
fn parse_float<F: Float>(raw: &str) -> Result<F, ParseError> {
    let parsed: F = raw.parse()?;
    if parsed.is_infinite() && !is_infinity_literal(raw) {
        return Err(ParseError::OutOfRange);
    }
    Ok(parsed)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn parse_bool(raw: &str) -> Result<bool, ParseError> {
    match raw {
        "1" => Ok(true),
        "0" => Ok(false),
        _ if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("t") => Ok(true),
        _ if raw.eq_ignore_ascii_case("false") || raw.eq_ignore_ascii_case("f") => Ok(false),
        _ => Err(ParseError::Boolean),
    }
}

/// One converted row: field names mapped to typed values.
///
/// Entries keep column order, but lookups and equality go by name.
#[derive(Debug, Clone, Default)]
pub struct TypedRecord {
    fields: Vec<(String, Value)>,
}

impl TypedRecord {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn into_value(self) -> Value {
        Value::Record(self.fields)
    }
}

impl PartialEq for TypedRecord {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .fields
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl From<TypedRecord> for Value {
    fn from(record: TypedRecord) -> Self {
        record.into_value()
    }
}

/// Converts delimited rows into [`TypedRecord`]s for one record schema.
#[derive(Debug, Clone)]
pub struct RecordConverter {
    fields: Vec<(String, FieldConverter)>,
}

impl RecordConverter {
    /// Builds converters for every field of a record schema. Fails on the
    /// first unsupported field type.
    pub fn from_schema(root: &RecordRoot) -> Result<Self, Error> {
        let converters = root
            .fields()
            .iter()
            .map(|field| {
                FieldConverter::for_schema(&field.name, &field.schema)
                    .map(|conv| (field.name.clone(), conv))
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (idx, (name, conv)) in converters.iter().enumerate() {
            debug!("Column #{idx} -> field '{name}' ({})", conv.kind());
        }
        Ok(Self { fields: converters })
    }

    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldKind)>,
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, kind)| (name.into(), FieldConverter::new(kind)))
                .collect(),
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn convert<'a, I>(&self, row: I) -> Result<TypedRecord, Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut record = TypedRecord::with_capacity(self.fields.len());
        for (index, raw) in row.into_iter().enumerate() {
            let (name, conv) = self.fields.get(index).ok_or(Error::ColumnOverflow {
                index,
                fields: self.fields.len(),
            })?;
            let value = conv.convert(raw).map_err(|source| Error::Conversion {
                field: name.clone(),
                kind: conv.kind(),
                input: raw.to_string(),
                source,
            })?;
            // Avro rejects duplicate field names, so a plain push keeps names unique.
            record.fields.push((name.clone(), value));
        }
        Ok(record)
    }
}
