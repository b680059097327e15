#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use apache_avro::{Schema, from_avro_datum, types::Value};
use csv2avro::schema::{RecordRoot, parse_record_schema};
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn load_fixture_schema(name: &str) -> RecordRoot {
    let text = fs::read_to_string(fixture_path(name)).expect("read schema fixture");
    parse_record_schema(&text).expect("parse schema fixture")
}

/// Decodes a stream of bare Avro datums written back to back.
pub fn decode_datums(schema: &Schema, bytes: &[u8]) -> Vec<Value> {
    let mut cursor = bytes;
    let mut values = Vec::new();
    while !cursor.is_empty() {
        values.push(from_avro_datum(schema, &mut cursor, None).expect("decode datum"));
    }
    values
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}
