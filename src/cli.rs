use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert CSV/TSV rows into Avro records using an Avro schema",
    long_about = None
)]
pub struct Cli {
    /// Avro schema file (.avsc) whose root is a record
    #[arg(short, long)]
    pub schema: PathBuf,
    /// Input CSV/TSV file (stdin if omitted or '-')
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Output file (stdout if omitted or '-')
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Treat the input as tab-separated regardless of its extension
    #[arg(short, long)]
    pub tsv: bool,
    /// Write an Avro object container file instead of bare binary records
    #[arg(long)]
    pub container: bool,
}
