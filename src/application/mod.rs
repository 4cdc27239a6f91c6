//! Application layer containing the rule evaluation orchestration.
//!
//! This module defines the `RuleEngine`, the primary entry point for
//! evaluating transaction eligibility. The engine is built once from
//! reference data and is immutable afterwards.

pub mod engine;
