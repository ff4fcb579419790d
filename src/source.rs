//! NDJSON record acquisition: replays newline-delimited JSON files one
//! decoded record at a time, the format validation batches are stored in
//! upstream.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde_json::Value;

use crate::{Result, SchemaError};

/// Iterator over the records of a newline-delimited JSON stream.
///
/// Blank lines are skipped. A line that fails to parse yields an error
/// tagged with its 1-based line number, and iteration continues with the
/// next line, so one bad record never hides the rest of the batch.
#[derive(Debug)]
pub struct RecordSource<R: BufRead> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> RecordSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl RecordSource<BufReader<File>> {
    /// Opens an NDJSON file for replay.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SchemaError::Load {
            message: format!("failed to open record file '{}': {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), "opened record source");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for RecordSource<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            self.line += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(SchemaError::Io(e))),
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&line).map_err(|e| SchemaError::Record {
                line: self.line,
                message: e.to_string(),
            }));
        }
        None
    }
}

/// Reads every record of an NDJSON file into memory, failing on the first
/// unreadable line.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    RecordSource::open(path)?.collect()
}
