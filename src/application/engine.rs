use crate::domain::payload::RequestPayload;
use crate::domain::ports::ReferenceDataSource;
use crate::domain::reference::{NoMatchPolicy, ReferenceData};
use crate::domain::result::EligibilityResult;
use crate::domain::rule::{RuleBox, RuleId, build_rule};
use crate::error::{EligibilityError, Result};
use tracing::{debug, info, warn};

/// Evaluates request payloads against an ordered, immutable rule set.
///
/// `RuleEngine` holds no mutable state after construction. Evaluation is a
/// pure function of the payload and the rule set, so one engine can be shared
/// behind an `Arc` by any number of threads or tasks.
pub struct RuleEngine {
    rules: Vec<RuleBox>,
    no_match: NoMatchPolicy,
}

impl RuleEngine {
    /// Creates a new `RuleEngine` from reference data.
    ///
    /// # Arguments
    ///
    /// * `reference` - Registry, exemption lists, declared rule order and
    ///   no-match policy. Rejected if the rule order is invalid.
    pub fn new(reference: ReferenceData) -> Result<Self> {
        reference.validate()?;
        Ok(Self::assemble(&reference))
    }

    /// Loads reference data from `source` and builds an engine from it.
    pub async fn from_source(source: &dyn ReferenceDataSource) -> Result<Self> {
        let reference = source.load().await?;
        Self::new(reference)
    }

    fn assemble(reference: &ReferenceData) -> Self {
        let rules: Vec<RuleBox> = reference
            .rule_order
            .iter()
            .filter_map(|id| build_rule(*id, reference))
            .collect();

        info!(
            rules = rules.len(),
            recognized_entities = reference.recognized_entities.len(),
            no_match = ?reference.no_match,
            "Rule engine initialized"
        );

        Self {
            rules,
            no_match: reference.no_match,
        }
    }

    /// The rules in the order they are evaluated.
    pub fn rule_order(&self) -> Vec<RuleId> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }

    /// Evaluates a payload; the first matching rule determines the result.
    pub fn evaluate(&self, payload: &RequestPayload) -> Result<EligibilityResult> {
        payload.validate()?;
        let party = payload.party_id();

        for rule in &self.rules {
            let matched = rule.matches(payload);
            debug!(party, rule = %rule.id(), matched, "Checked rule");

            if matched {
                let result = EligibilityResult::from_outcome(rule.id(), rule.outcome());
                info!(
                    party,
                    matched_rule = %result.matched_rule,
                    eligible = result.eligible,
                    oos_category = ?result.oos_category,
                    "Evaluated eligibility"
                );
                return Ok(result);
            }
        }

        warn!(party, policy = ?self.no_match, "No rule matched");
        match self.no_match {
            NoMatchPolicy::Error => Err(EligibilityError::NoRuleMatched(party.to_string())),
            NoMatchPolicy::Ineligible => Ok(EligibilityResult::no_match()),
        }
    }

    /// Validates a raw JSON value at the boundary, then evaluates it.
    pub fn evaluate_value(&self, value: serde_json::Value) -> Result<EligibilityResult> {
        if !value.is_object() {
            return Err(EligibilityError::ValidationError(
                "Payload must be a JSON object".to_string(),
            ));
        }
        let payload: RequestPayload = serde_json::from_value(value)
            .map_err(|e| EligibilityError::ValidationError(format!("Malformed payload: {e}")))?;
        self.evaluate(&payload)
    }

    /// Parses and evaluates a JSON document holding a single payload.
    pub fn evaluate_json(&self, input: &str) -> Result<EligibilityResult> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        self.evaluate_value(value)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::assemble(&ReferenceData::default())
    }
}
