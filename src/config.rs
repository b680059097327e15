//! Immutable run configuration resolved from command-line arguments.

use std::path::PathBuf;

use crate::{cli::Cli, io_utils};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Bare Avro binary records, one after another.
    #[default]
    Datum,
    /// Avro object container file with an embedded schema.
    Container,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub schema: PathBuf,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Explicit delimiter. When unset, the input's extension decides.
    pub delimiter: Option<u8>,
    pub format: OutputFormat,
}

impl Config {
    pub fn new(schema: impl Into<PathBuf>) -> Self {
        Self {
            schema: schema.into(),
            input: None,
            output: None,
            delimiter: None,
            format: OutputFormat::Datum,
        }
    }

    /// The delimiter rows are split on: the explicit one if set, otherwise
    /// tab for `.tsv` inputs and comma for everything else.
    pub fn resolved_delimiter(&self) -> u8 {
        self.delimiter
            .unwrap_or_else(|| io_utils::resolve_input_delimiter(self.input.as_deref(), false))
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            schema: cli.schema.clone(),
            input: cli.input.clone(),
            output: cli.output.clone(),
            delimiter: cli.tsv.then_some(io_utils::DEFAULT_TSV_DELIMITER),
            format: if cli.container {
                OutputFormat::Container
            } else {
                OutputFormat::Datum
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn config_from_cli_resolves_delimiter_and_format() {
        let cli = Cli::parse_from(["csv2avro", "-s", "s.avsc", "-i", "rows.tsv", "--container"]);
        let config = Config::from(&cli);
        assert_eq!(config.resolved_delimiter(), b'\t');
        assert_eq!(config.format, OutputFormat::Container);
        assert_eq!(config.input.as_deref(), Some(std::path::Path::new("rows.tsv")));

        let cli = Cli::parse_from(["csv2avro", "-s", "s.avsc"]);
        let config = Config::from(&cli);
        assert_eq!(config.resolved_delimiter(), b',');
        assert_eq!(config.format, OutputFormat::Datum);
        assert!(config.input.is_none());
    }

    #[test]
    fn tsv_flag_applies_to_stdin() {
        let cli = Cli::parse_from(["csv2avro", "-s", "s.avsc", "--tsv"]);
        assert_eq!(Config::from(&cli).resolved_delimiter(), b'\t');

        let cli = Cli::parse_from(["csv2avro", "-s", "s.avsc", "-i", "rows.csv", "--tsv"]);
        assert_eq!(Config::from(&cli).resolved_delimiter(), b'\t');
    }

    #[test]
    fn builder_tracks_input_extension() {
        let config = Config::new("s.avsc").with_input("data.TSV").with_output("out.avro");
        assert_eq!(config.resolved_delimiter(), b'\t');
        assert_eq!(config.output.as_deref(), Some(std::path::Path::new("out.avro")));
    }

    #[test]
    fn explicit_delimiter_survives_any_builder_order() {
        let before = Config::new("s.avsc").with_delimiter(b';').with_input("x.csv");
        let after = Config::new("s.avsc").with_input("x.csv").with_delimiter(b';');
        assert_eq!(before.resolved_delimiter(), b';');
        assert_eq!(after.resolved_delimiter(), b';');
        assert_eq!(before, after);

        let tsv = Config::new("s.avsc").with_delimiter(b'|').with_input("x.tsv");
        assert_eq!(tsv.resolved_delimiter(), b'|');
    }
}
