//! Record construction: size derivation and checksum attachment.
//!
//! `sizeBytes` is always recomputed here from the payload itself, never taken
//! from the caller, so it cannot drift from what is stored.

use std::io;

use serde::Serialize;
use serde_json::{ser::Formatter, Serializer, Value};

use codex_contracts::{
    error::{CodexError, CodexResult},
    record::{LogRecord, Payload},
};
use codex_core::{sha256_hex_str, utc_now};

/// Build a timestamped `LogRecord` ready to append.
///
/// Returns `CodexError::Serialization` when `payload` is not a JSON object.
pub fn build_record(
    job_id: &str,
    stage: &str,
    status: &str,
    payload: Value,
    checksum_source: Option<&str>,
) -> CodexResult<LogRecord> {
    let payload = match payload {
        Value::Object(map) => map,
        other => {
            return Err(CodexError::Serialization {
                reason: format!("lineage payload must be a JSON object, got {}", other),
            })
        }
    };

    let size_bytes = payload_size(&payload)?;

    Ok(LogRecord {
        timestamp: utc_now(),
        job_id: job_id.to_string(),
        stage: stage.to_string(),
        status: status.to_string(),
        payload,
        size_bytes,
        checksum: checksum_source.map(sha256_hex_str),
    })
}

/// Single-line JSON with `", "` between items and `": "` after keys.
struct SpacedSeparators;

impl Formatter for SpacedSeparators {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// UTF-8 byte length of `payload` serialized in key insertion order with
/// spaced separators, e.g. `{"text": "é"}` is 14 bytes.
///
/// Non-ASCII characters are written as raw UTF-8, so `é` counts as two bytes
/// rather than the six of its `\u` escape.
pub fn payload_size(payload: &Payload) -> CodexResult<u64> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, SpacedSeparators);
    payload
        .serialize(&mut ser)
        .map_err(|e| CodexError::Serialization {
            reason: format!("failed to serialize lineage payload: {}", e),
        })?;
    Ok(buf.len() as u64)
}
