//! The conversion loop: read a row, convert it, hand it to the encoder.
//!
//! Rows are processed strictly one at a time in input order, and the first
//! failure of any kind aborts the run. Nothing is skipped or retried.

use std::io::Read;

use anyhow::{Context, Result};
use csv::StringRecord;
use log::{debug, info};

use crate::{
    config::{Config, OutputFormat},
    convert::RecordConverter,
    encode::{ContainerEncoder, DatumEncoder, RecordSink},
    error::Error,
    io_utils, schema,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionSummary {
    pub records: u64,
}

pub fn execute(config: &Config) -> Result<ConversionSummary> {
    let delimiter = config.resolved_delimiter();
    let schema = schema::load_record_schema(&config.schema)?;
    // Built before any input is opened so an unusable schema fails first.
    let converter = RecordConverter::from_schema(&schema)
        .with_context(|| format!("Building converters from {:?}", config.schema))?;

    info!(
        "Converting {} -> {} (delimiter '{}', {} field(s), {:?} output)",
        describe_path(config.input.as_deref(), "stdin"),
        describe_path(config.output.as_deref(), "stdout"),
        crate::printable_delimiter(delimiter),
        converter.field_count(),
        config.format
    );

    let mut reader = io_utils::open_csv_reader_from_path(config.input.as_deref(), delimiter)?;
    let output = io_utils::open_output(config.output.as_deref())?;
    let mut sink: Box<dyn RecordSink + '_> = match config.format {
        OutputFormat::Datum => Box::new(DatumEncoder::new(&schema, output)),
        OutputFormat::Container => Box::new(ContainerEncoder::new(&schema, output)),
    };

    let records = convert_rows(&converter, &mut reader, sink.as_mut())?;
    info!("Wrote {records} record(s)");
    Ok(ConversionSummary { records })
}

/// Pulls every row from `reader`, converts it, and appends it to `sink`.
///
/// Returns the number of records written. `sink` is finished only when every
/// row converted and encoded cleanly.
pub fn convert_rows<R, S>(
    converter: &RecordConverter,
    reader: &mut csv::Reader<R>,
    sink: &mut S,
) -> Result<u64>
where
    R: Read,
    S: RecordSink + ?Sized,
{
    let mut row = StringRecord::new();
    let mut records = 0u64;
    loop {
        let row_number = records + 1;
        let more = reader
            .read_record(&mut row)
            .map_err(Error::from)
            .with_context(|| format!("Reading row {row_number}"))?;
        if !more {
            break;
        }
        let record = converter
            .convert(row.iter())
            .with_context(|| format!("Converting row {row_number}"))?;
        let columns = record.len();
        sink.append(record)
            .with_context(|| encoding_context(converter, row_number, columns))?;
        records = row_number;
    }
    sink.finish().context("Flushing output")?;
    debug!("Reached end of input after {records} row(s)");
    Ok(records)
}

// Short rows only fail inside the encoder, so name the trailing fields the
// row never supplied.
fn encoding_context(converter: &RecordConverter, row_number: u64, columns: usize) -> String {
    let missing: Vec<&str> = converter.field_names().skip(columns).collect();
    if missing.is_empty() {
        format!("Encoding row {row_number}")
    } else {
        format!(
            "Encoding row {row_number} (missing field(s): {})",
            missing.join(", ")
        )
    }
}

fn describe_path(path: Option<&std::path::Path>, stream: &str) -> String {
    match path {
        Some(p) if !io_utils::is_dash(p) => format!("{p:?}"),
        _ => stream.to_string(),
    }
}
