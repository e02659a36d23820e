//! Two-column CSV dataset loader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use prophet_spi::{DataPoint, Dataset, DatasetSource, InputError, ProphetError, Result};
use tracing::debug;

/// Loads `(label, value)` rows from delimited text.
///
/// The first row is always skipped as a header. Every other row must hold
/// exactly two fields and a value that parses as `f64`; the label is kept
/// verbatim. Rows come out in source order.
#[derive(Debug, Clone)]
pub struct CsvDatasetLoader {
    delimiter: u8,
}

impl CsvDatasetLoader {
    /// Create a comma-delimited loader.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Use a different field delimiter (e.g. `b';'` or `b'\t'`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Read a dataset from any byte stream.
    pub fn load<R: Read>(&self, reader: R) -> Result<Dataset> {
        // Field counts are checked per row so a bad row reports its own
        // line instead of a csv length mismatch.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut dataset = Dataset::new();

        // The header is read as raw bytes so its encoding never matters.
        let mut header = csv::ByteRecord::new();
        if !reader.read_byte_record(&mut header).map_err(read_error)? {
            debug!("empty input");
            return Ok(dataset);
        }

        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(read_error)?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2);

            if record.len() != 2 {
                return Err(InputError::MalformedRow {
                    line,
                    fields: record.iter().map(String::from).collect(),
                }
                .into());
            }

            let raw = &record[1];
            let value = raw
                .parse::<f64>()
                .map_err(|source| InputError::InvalidValue {
                    line,
                    value: raw.to_string(),
                    source,
                })?;

            dataset.push(DataPoint::new(&record[0], value));
        }

        debug!(points = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    /// Read a dataset from a file. The file is closed on every exit path.
    pub fn load_file(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path).map_err(|source| InputError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "reading dataset");
        self.load(BufReader::new(file))
    }
}

impl Default for CsvDatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetSource for CsvDatasetLoader {
    fn name(&self) -> &str {
        "csv"
    }

    fn load_reader(&self, reader: &mut dyn Read) -> Result<Dataset> {
        self.load(reader)
    }

    fn load_path(&self, path: &Path) -> Result<Dataset> {
        self.load_file(path)
    }
}

fn read_error(err: csv::Error) -> ProphetError {
    InputError::Read {
        line: err.position().map(|p| p.line()),
        reason: err.to_string(),
    }
    .into()
}
