//! Typed error kinds raised while converting delimited rows into Avro records.
//!
//! Library code returns [`Error`]; orchestration code in [`crate::pipeline`]
//! wraps it with row or path context through `anyhow`. Every kind aborts the
//! run.
//!
//! Messages never repeat their `#[source]`; callers render the full chain
//! with `{:#}`.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{convert::ParseError, schema::FieldKind};

#[derive(Debug, Error)]
pub enum Error {
    /// The schema file is missing, unreadable, malformed, or not a record.
    #[error("Failed to load schema {path:?}: {reason}")]
    SchemaLoad { path: PathBuf, reason: String },

    /// A schema field declares a type outside the supported primitive set.
    #[error("Field '{field}' has unsupported type '{kind}'")]
    UnsupportedType { field: String, kind: String },

    #[error("Failed to open {path:?}")]
    IoOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed row")]
    RowRead(#[from] csv::Error),

    /// The row has more columns than the schema declares fields.
    #[error("No field converter for column #{index} (schema declares {fields} field(s))")]
    ColumnOverflow { index: usize, fields: usize },

    #[error("Failed to convert '{input}' for field '{field}' as {kind}")]
    Conversion {
        field: String,
        kind: FieldKind,
        input: String,
        #[source]
        source: ParseError,
    },

    #[error("Failed to encode record")]
    Encode(#[from] apache_avro::Error),

    #[error("Failed to write output")]
    Write(#[from] io::Error),
}
