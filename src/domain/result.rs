use super::rule::{OosCategory, Outcome, RuleId};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The verdict returned for a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub eligible: bool,
    /// Always serialized, as `null` when there is no category.
    pub oos_category: Option<OosCategory>,
    pub matched_rule: RuleId,
}

impl EligibilityResult {
    pub fn from_outcome(rule: RuleId, outcome: Outcome) -> Self {
        Self {
            eligible: outcome.eligible,
            oos_category: Some(outcome.category),
            matched_rule: rule,
        }
    }

    /// Result used when no rule matched under the `ineligible` policy.
    pub fn no_match() -> Self {
        Self {
            eligible: false,
            oos_category: None,
            matched_rule: RuleId::NoMatchFallback,
        }
    }

    /// Stable, human-readable rendering for audit logs.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
