//! Lazy, filtered replay over an NDJSON lineage log.

use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Split},
    path::Path,
};

use serde_json::Value;
use tracing::{debug, warn};

use codex_contracts::{error::CodexResult, record::StoredRecord};

/// Iterator over the records of one job, in file order.
///
/// Lines are read one at a time as the iterator advances.  Any JSON object
/// whose `jobId` equals the query is yielded as stored, whichever writer
/// appended it: unknown keys are kept and key order is preserved.  Blank
/// lines, invalid JSON, non-UTF-8 bytes, and non-object values are skipped
/// without ending the scan.  A read error ends the scan.
pub struct Replay {
    job_id: String,
    lines: Option<Split<BufReader<File>>>,
    line_no: u64,
}

impl Replay {
    pub(crate) fn open(path: &Path, job_id: &str) -> CodexResult<Self> {
        let lines = match File::open(path) {
            Ok(file) => Some(BufReader::new(file).split(b'\n')),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(log = %path.display(), "lineage log absent; replay is empty");
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            job_id: job_id.to_string(),
            lines,
            line_no: 0,
        })
    }

    /// The job id this replay filters on.
    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

impl Iterator for Replay {
    type Item = StoredRecord;

    fn next(&mut self) -> Option<StoredRecord> {
        loop {
            let bytes = match self.lines.as_mut()?.next()? {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(line = self.line_no + 1, error = %e, "lineage log read failed; ending replay");
                    self.lines = None;
                    return None;
                }
            };
            self.line_no += 1;

            if bytes.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(record)) => {
                    if record.get("jobId").and_then(Value::as_str) == Some(self.job_id.as_str()) {
                        return Some(record);
                    }
                }
                Ok(_) => {
                    debug!(line = self.line_no, "skipping non-object lineage line");
                }
                Err(e) => {
                    debug!(line = self.line_no, error = %e, "skipping malformed lineage line");
                }
            }
        }
    }
}
