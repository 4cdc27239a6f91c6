use super::payload::{RequestPayload, normalize};
use super::rule::RuleId;
use crate::error::{EligibilityError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Evaluation order used when reference data does not declare one.
///
/// Scope exemptions run before the positive nexus match, so an exempt trade
/// by a recognized party is still reported as exempt.
pub const DEFAULT_RULE_ORDER: [RuleId; 5] = [
    RuleId::PartyRule,
    RuleId::IntraEntityRule,
    RuleId::ProductRule,
    RuleId::CommodityExchangeTradeRule,
    RuleId::PartyRuleNexusEligibility,
];

/// What the engine returns when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoMatchPolicy {
    /// Fail with `EligibilityError::NoRuleMatched`.
    #[default]
    Error,
    /// Return a not-eligible result attributed to `NoMatchFallback`.
    Ineligible,
}

/// Static reference data the rule set is built from.
///
/// Loaded once at startup and never mutated afterwards. Missing keys in a
/// reference file fall back to the values of [`ReferenceData::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferenceData {
    /// Parties treated as recognized (MAS) entities.
    pub recognized_entities: Vec<String>,
    /// Jurisdictions that constitute a qualifying nexus.
    pub qualifying_nexus: Vec<String>,
    /// Product types that are out of scope.
    pub excluded_products: Vec<String>,
    /// Venue codes of recognized commodity exchanges.
    pub commodity_exchanges: Vec<String>,
    pub rule_order: Vec<RuleId>,
    pub no_match: NoMatchPolicy,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            recognized_entities: Vec::new(),
            qualifying_nexus: to_strings(&["Singapore", "SG"]),
            excluded_products: to_strings(&["FX_SPOT", "SECURITIES_LENDING", "REPO"]),
            commodity_exchanges: to_strings(&["SGX", "ICE", "CME", "LME", "NYMEX"]),
            rule_order: DEFAULT_RULE_ORDER.to_vec(),
            no_match: NoMatchPolicy::Error,
        }
    }
}

impl ReferenceData {
    /// Rejects rule orders that are empty, repeat a rule, or name the fallback.
    pub fn validate(&self) -> Result<()> {
        if self.rule_order.is_empty() {
            return Err(EligibilityError::ValidationError(
                "ruleOrder must name at least one rule".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for id in &self.rule_order {
            if *id == RuleId::NoMatchFallback {
                return Err(EligibilityError::ValidationError(format!(
                    "{id} cannot appear in ruleOrder"
                )));
            }
            if !seen.insert(*id) {
                return Err(EligibilityError::ValidationError(format!(
                    "Duplicate rule {id} in ruleOrder"
                )));
            }
        }
        Ok(())
    }
}

/// A normalized, case-insensitive set of reference codes.
#[derive(Debug, Clone, Default)]
pub struct CodeSet(HashSet<String>);

impl CodeSet {
    pub fn new<S: AsRef<str>>(codes: &[S]) -> Self {
        Self(
            codes
                .iter()
                .map(|c| normalize(c.as_ref()))
                .filter(|c| !c.is_empty())
                .collect(),
        )
    }

    /// Absent values never match.
    pub fn contains(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| self.0.contains(&normalize(v)))
    }
}

/// The recognized-entities registry.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: CodeSet,
}

impl EntityRegistry {
    pub fn new<S: AsRef<str>>(entities: &[S]) -> Self {
        Self {
            entities: CodeSet::new(entities),
        }
    }

    /// An explicit `inMasEntities` flag wins over the registry lookup.
    pub fn recognizes(&self, payload: &RequestPayload) -> bool {
        payload
            .in_mas_entities
            .unwrap_or_else(|| self.entities.contains(payload.party.as_deref()))
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_reference_is_valid() {
        let reference = ReferenceData::default();
        assert!(reference.validate().is_ok());
        assert_eq!(reference.rule_order, DEFAULT_RULE_ORDER.to_vec());
        assert_eq!(reference.no_match, NoMatchPolicy::Error);
    }

    #[test]
    fn test_partial_reference_takes_defaults() {
        let reference: ReferenceData = serde_json::from_value(json!({
            "recognizedEntities": ["Y"],
            "noMatch": "ineligible"
        }))
        .unwrap();

        assert_eq!(reference.recognized_entities, vec!["Y".to_string()]);
        assert_eq!(reference.no_match, NoMatchPolicy::Ineligible);
        assert_eq!(reference.qualifying_nexus, ReferenceData::default().qualifying_nexus);
        assert_eq!(reference.rule_order.len(), 5);
    }

    #[test]
    fn test_validate_rejects_bad_orders() {
        let mut reference = ReferenceData {
            rule_order: vec![],
            ..ReferenceData::default()
        };
        assert!(matches!(
            reference.validate(),
            Err(EligibilityError::ValidationError(_))
        ));

        reference.rule_order = vec![RuleId::ProductRule, RuleId::ProductRule];
        let err = reference.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate rule ProductRule"));

        reference.rule_order = vec![RuleId::PartyRule, RuleId::NoMatchFallback];
        assert!(reference.validate().is_err());
    }

    #[test]
    fn test_code_set_is_case_insensitive() {
        let codes = CodeSet::new(&["FX_SPOT", " repo ", ""]);
        assert!(codes.contains(Some("fx_spot")));
        assert!(codes.contains(Some("REPO")));
        assert!(!codes.contains(Some("IRS")));
        assert!(!codes.contains(None));
        assert!(!codes.contains(Some("")));
    }

    #[test]
    fn test_registry_flag_overrides_lookup() {
        let registry = EntityRegistry::new(&["DBS"]);

        let listed = RequestPayload::for_party("dbs");
        assert!(registry.recognizes(&listed));

        let mut overridden = RequestPayload::for_party("DBS");
        overridden.in_mas_entities = Some(false);
        assert!(!registry.recognizes(&overridden));

        let mut asserted = RequestPayload::for_party("UNKNOWN");
        asserted.in_mas_entities = Some(true);
        assert!(registry.recognizes(&asserted));
    }
}
