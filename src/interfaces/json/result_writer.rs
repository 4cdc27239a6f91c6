use crate::domain::result::EligibilityResult;
use crate::error::Result;
use crate::interfaces::ResultWriter;
use std::io::Write;

/// Writes each result as a pretty-printed JSON document.
pub struct JsonResultWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonResultWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ResultWriter for JsonResultWriter<W> {
    fn write_result(&mut self, _source: &str, result: &EligibilityResult) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, result)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
