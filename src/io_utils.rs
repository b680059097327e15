//! I/O utilities for reading delimited rows and opening the output sink.
//!
//! - **Delimiter resolution**: `.tsv` inputs (any case) or `--tsv` select tab,
//!   everything else reads as comma-separated.
//! - **stdin/stdout**: a missing path or the `-` path routes through the
//!   standard streams.
//! - **Row layout**: readers never consume a header row and accept ragged
//!   rows, so the record converter alone decides whether a row's column count
//!   fits the schema.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::error::Error;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_input_delimiter(path: Option<&Path>, force_tsv: bool) -> u8 {
    if force_tsv {
        return DEFAULT_TSV_DELIMITER;
    }
    match path.and_then(Path::extension).and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    }
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: Option<&Path>,
    delimiter: u8,
) -> Result<csv::Reader<Box<dyn Read>>, Error> {
    let reader: Box<dyn Read> = match path {
        Some(p) if !is_dash(p) => Box::new(BufReader::new(File::open(p).map_err(|source| {
            Error::IoOpen {
                path: p.to_path_buf(),
                source,
            }
        })?)),
        _ => Box::new(std::io::stdin().lock()),
    };
    Ok(open_csv_reader(reader, delimiter))
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, Error> {
    let writer: Box<dyn Write> = match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(File::create(p).map_err(|source| {
            Error::IoOpen {
                path: p.to_path_buf(),
                source,
            }
        })?)),
        _ => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    Ok(writer)
}
