use crate::error::{EligibilityError, Result};
use serde_json::Value;
use std::io::Read;

/// Reads raw payloads from a JSON source.
///
/// Accepts a single object, an array of objects, or a stream of
/// whitespace/newline separated objects (JSON Lines). Payloads are returned
/// as untyped values; typing and validation happen in the engine.
pub struct PayloadReader<R: Read> {
    source: R,
}

impl<R: Read> PayloadReader<R> {
    /// Creates a new `PayloadReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Reads every payload in the source.
    ///
    /// Only an unreadable source fails as a whole. A malformed top-level array
    /// yields a single error entry. In a stream, a malformed document yields
    /// an error entry and ends the stream, since the position of the next
    /// document is unknown.
    pub fn payloads(mut self) -> Result<Vec<Result<Value>>> {
        let mut buf = String::new();
        self.source.read_to_string(&mut buf)?;
        let trimmed = buf.trim_start();

        if trimmed.starts_with('[') {
            return Ok(match serde_json::from_str::<Vec<Value>>(trimmed) {
                Ok(values) => values.into_iter().map(Ok).collect(),
                Err(e) => vec![Err(EligibilityError::from(e))],
            });
        }

        let mut payloads = Vec::new();
        for item in serde_json::Deserializer::from_str(trimmed).into_iter::<Value>() {
            match item {
                Ok(value) => payloads.push(Ok(value)),
                Err(e) => {
                    payloads.push(Err(EligibilityError::from(e)));
                    break;
                }
            }
        }
        Ok(payloads)
    }
}
