//! Adapters between the engine and the outside world: payload readers and
//! result writers.

use crate::domain::result::EligibilityResult;
use crate::error::Result;

pub mod csv;
pub mod json;

/// A destination for evaluation results.
pub trait ResultWriter {
    /// Writes one result. `source` identifies the payload it was computed for.
    fn write_result(&mut self, source: &str, result: &EligibilityResult) -> Result<()>;
    /// Flushes any buffered output.
    fn finish(&mut self) -> Result<()>;
}
