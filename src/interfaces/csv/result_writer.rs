use crate::domain::result::EligibilityResult;
use crate::domain::rule::{OosCategory, RuleId};
use crate::error::Result;
use crate::interfaces::ResultWriter;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ResultRecord<'a> {
    source: &'a str,
    eligible: bool,
    oos_category: Option<OosCategory>,
    matched_rule: RuleId,
}

/// Writes results as CSV rows, one per evaluated payload.
///
/// Columns are `source,eligible,oos_category,matched_rule`; a missing
/// category is written as an empty field.
pub struct CsvResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }
}

impl<W: Write> ResultWriter for CsvResultWriter<W> {
    fn write_result(&mut self, source: &str, result: &EligibilityResult) -> Result<()> {
        self.writer.serialize(ResultRecord {
            source,
            eligible: result.eligible,
            oos_category: result.oos_category,
            matched_rule: result.matched_rule,
        })?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
