#![allow(dead_code)]

use eligibility::application::engine::RuleEngine;
use eligibility::domain::reference::ReferenceData;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> Value {
    let contents = std::fs::read_to_string(fixture(name)).expect("Failed to read fixture");
    serde_json::from_str(&contents).expect("Failed to parse fixture")
}

pub fn engine_with_registry(entities: &[&str]) -> RuleEngine {
    RuleEngine::new(ReferenceData {
        recognized_entities: entities.iter().map(|e| e.to_string()).collect(),
        ..ReferenceData::default()
    })
    .expect("Default reference data must be valid")
}

/// Writes one JSON document per line into a temporary file.
pub fn write_payloads(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write payload");
    }
    file
}
