//! Avro encoders that append converted records to an output stream.
//!
//! [`DatumEncoder`] writes each record as a bare Avro binary datum with no
//! framing, so the output is a plain concatenation of encoded records.
//! [`ContainerEncoder`] writes an Avro object container file with the schema
//! embedded in its header.

use std::io::{self, Write};

use apache_avro::{Schema, Writer, to_avro_datum};

use crate::{convert::TypedRecord, error::Error};

/// Destination for converted records.
pub trait RecordSink {
    /// Encodes one record and appends it to the output.
    fn append(&mut self, record: TypedRecord) -> Result<(), Error>;

    /// Flushes anything buffered. Called once after the last record.
    fn finish(&mut self) -> Result<(), Error>;
}

pub struct DatumEncoder<'s, W: Write> {
    schema: &'s Schema,
    writer: W,
}

impl<'s, W: Write> DatumEncoder<'s, W> {
    pub fn new(schema: &'s Schema, writer: W) -> Self {
        Self { schema, writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for DatumEncoder<'_, W> {
    fn append(&mut self, record: TypedRecord) -> Result<(), Error> {
        let datum = to_avro_datum(self.schema, record)?;
        self.writer.write_all(&datum)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

pub struct ContainerEncoder<'s, W: Write> {
    writer: Option<Writer<'s, W>>,
}

impl<'s, W: Write> ContainerEncoder<'s, W> {
    pub fn new(schema: &'s Schema, writer: W) -> Self {
        Self {
            writer: Some(Writer::new(schema, writer)),
        }
    }
}

impl<W: Write> RecordSink for ContainerEncoder<'_, W> {
    fn append(&mut self, record: TypedRecord) -> Result<(), Error> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other("container already finished"))?;
        writer.append(record)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Error> {
        if let Some(writer) = self.writer.take() {
            let mut inner = writer.into_inner()?;
            inner.flush()?;
        }
        Ok(())
    }
}
