use super::payload::RequestPayload;
use super::reference::{CodeSet, EntityRegistry, ReferenceData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the rule that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    PartyRule,
    PartyRuleNexusEligibility,
    IntraEntityRule,
    ProductRule,
    CommodityExchangeTradeRule,
    /// Attributed when nothing matched and the policy is `ineligible`.
    NoMatchFallback,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::PartyRule => "PartyRule",
            RuleId::PartyRuleNexusEligibility => "PartyRuleNexusEligibility",
            RuleId::IntraEntityRule => "IntraEntityRule",
            RuleId::ProductRule => "ProductRule",
            RuleId::CommodityExchangeTradeRule => "CommodityExchangeTradeRule",
            RuleId::NoMatchFallback => "NoMatchFallback",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Out-of-scope category codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OosCategory {
    PartyExemption,
    NexusEligible,
    IntraEntityExemption,
    ProductTypeExemption,
    CommodityExemption,
}

impl OosCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OosCategory::PartyExemption => "PARTY_EXEMPTION",
            OosCategory::NexusEligible => "NEXUS_ELIGIBLE",
            OosCategory::IntraEntityExemption => "INTRA_ENTITY_EXEMPTION",
            OosCategory::ProductTypeExemption => "PRODUCT_TYPE_EXEMPTION",
            OosCategory::CommodityExemption => "COMMODITY_EXEMPTION",
        }
    }
}

impl fmt::Display for OosCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verdict a rule yields when its predicate holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub eligible: bool,
    pub category: OosCategory,
}

impl Outcome {
    const fn exempt(category: OosCategory) -> Self {
        Self {
            eligible: false,
            category,
        }
    }
}

/// An eligibility rule: a named predicate with a fixed outcome.
///
/// Predicates are total over validated payloads and never mutate state.
pub trait Rule: Send + Sync {
    fn id(&self) -> RuleId;
    fn matches(&self, payload: &RequestPayload) -> bool;
    fn outcome(&self) -> Outcome;
}

pub type RuleBox = Box<dyn Rule>;

/// Party is not a recognized entity.
pub struct PartyRule {
    registry: EntityRegistry,
}

impl Rule for PartyRule {
    fn id(&self) -> RuleId {
        RuleId::PartyRule
    }

    fn matches(&self, payload: &RequestPayload) -> bool {
        !self.registry.recognizes(payload)
    }

    fn outcome(&self) -> Outcome {
        Outcome::exempt(OosCategory::PartyExemption)
    }
}

/// Party is recognized and the transaction has a qualifying nexus.
pub struct PartyNexusEligibilityRule {
    registry: EntityRegistry,
    qualifying_nexus: CodeSet,
}

impl Rule for PartyNexusEligibilityRule {
    fn id(&self) -> RuleId {
        RuleId::PartyRuleNexusEligibility
    }

    fn matches(&self, payload: &RequestPayload) -> bool {
        self.registry.recognizes(payload)
            && self.qualifying_nexus.contains(payload.nexus.as_deref())
    }

    fn outcome(&self) -> Outcome {
        Outcome {
            eligible: true,
            category: OosCategory::NexusEligible,
        }
    }
}

/// Flagged intra-entity, or both sides name the same party, legal entity or
/// affiliated group.
pub struct IntraEntityRule;

impl Rule for IntraEntityRule {
    fn id(&self) -> RuleId {
        RuleId::IntraEntityRule
    }

    fn matches(&self, payload: &RequestPayload) -> bool {
        payload.intra_entity == Some(true) || payload.counterparties_share_entity()
    }

    fn outcome(&self) -> Outcome {
        Outcome::exempt(OosCategory::IntraEntityExemption)
    }
}

/// Product type is on the excluded list.
pub struct ProductRule {
    excluded_products: CodeSet,
}

impl Rule for ProductRule {
    fn id(&self) -> RuleId {
        RuleId::ProductRule
    }

    fn matches(&self, payload: &RequestPayload) -> bool {
        self.excluded_products.contains(payload.product_type.as_deref())
    }

    fn outcome(&self) -> Outcome {
        Outcome::exempt(OosCategory::ProductTypeExemption)
    }
}

/// Executed on or through a recognized commodity exchange.
pub struct CommodityExchangeTradeRule {
    exchanges: CodeSet,
}

impl Rule for CommodityExchangeTradeRule {
    fn id(&self) -> RuleId {
        RuleId::CommodityExchangeTradeRule
    }

    fn matches(&self, payload: &RequestPayload) -> bool {
        payload.commodity_exchange_trade == Some(true)
            || self.exchanges.contains(payload.execution_venue.as_deref())
    }

    fn outcome(&self) -> Outcome {
        Outcome::exempt(OosCategory::CommodityExemption)
    }
}

/// Builds the rule identified by `id` from reference data.
///
/// Returns `None` for `NoMatchFallback`, which is an outcome rather than a rule.
pub fn build_rule(id: RuleId, reference: &ReferenceData) -> Option<RuleBox> {
    let rule: RuleBox = match id {
        RuleId::PartyRule => Box::new(PartyRule {
            registry: EntityRegistry::new(&reference.recognized_entities),
        }),
        RuleId::PartyRuleNexusEligibility => Box::new(PartyNexusEligibilityRule {
            registry: EntityRegistry::new(&reference.recognized_entities),
            qualifying_nexus: CodeSet::new(&reference.qualifying_nexus),
        }),
        RuleId::IntraEntityRule => Box::new(IntraEntityRule),
        RuleId::ProductRule => Box::new(ProductRule {
            excluded_products: CodeSet::new(&reference.excluded_products),
        }),
        RuleId::CommodityExchangeTradeRule => Box::new(CommodityExchangeTradeRule {
            exchanges: CodeSet::new(&reference.commodity_exchanges),
        }),
        RuleId::NoMatchFallback => return None,
    };
    Some(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: RuleId) -> RuleBox {
        let reference = ReferenceData {
            recognized_entities: vec!["Y".to_string()],
            ..ReferenceData::default()
        };
        build_rule(id, &reference).unwrap()
    }

    #[test]
    fn test_rule_id_serialization() {
        let json = serde_json::to_string(&RuleId::PartyRuleNexusEligibility).unwrap();
        assert_eq!(json, "\"PartyRuleNexusEligibility\"");

        let id: RuleId = serde_json::from_str("\"CommodityExchangeTradeRule\"").unwrap();
        assert_eq!(id, RuleId::CommodityExchangeTradeRule);
    }

    #[test]
    fn test_oos_category_serialization() {
        for category in [
            OosCategory::PartyExemption,
            OosCategory::NexusEligible,
            OosCategory::IntraEntityExemption,
            OosCategory::ProductTypeExemption,
            OosCategory::CommodityExemption,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_party_rule() {
        let party = rule(RuleId::PartyRule);
        assert!(party.matches(&RequestPayload::for_party("X")));
        assert!(!party.matches(&RequestPayload::for_party("y")));
        assert_eq!(party.outcome(), Outcome::exempt(OosCategory::PartyExemption));
    }

    #[test]
    fn test_nexus_rule_needs_recognition_and_nexus() {
        let nexus = rule(RuleId::PartyRuleNexusEligibility);

        let mut payload = RequestPayload::for_party("Y");
        assert!(!nexus.matches(&payload));

        payload.nexus = Some("singapore".to_string());
        assert!(nexus.matches(&payload));

        payload.nexus = Some("Hong Kong".to_string());
        assert!(!nexus.matches(&payload));

        let mut unrecognized = RequestPayload::for_party("X");
        unrecognized.nexus = Some("SG".to_string());
        assert!(!nexus.matches(&unrecognized));
        assert!(nexus.outcome().eligible);
    }

    #[test]
    fn test_intra_entity_rule() {
        let intra = rule(RuleId::IntraEntityRule);

        let mut payload = RequestPayload::for_party("Y");
        assert!(!intra.matches(&payload));

        payload.intra_entity = Some(false);
        assert!(!intra.matches(&payload));

        payload.intra_entity = Some(true);
        assert!(intra.matches(&payload));

        let mut linked = RequestPayload::for_party("Y");
        linked.party_group = Some("G1".to_string());
        linked.counterparty_group = Some("G1".to_string());
        assert!(intra.matches(&linked));
    }

    #[test]
    fn test_intra_entity_rule_same_counterparty() {
        let intra = rule(RuleId::IntraEntityRule);

        let mut payload = RequestPayload::for_party("Y");
        payload.counterparty = Some("Z".to_string());
        assert!(!intra.matches(&payload));

        payload.counterparty = Some("y".to_string());
        assert!(intra.matches(&payload));
    }

    #[test]
    fn test_product_rule() {
        let product = rule(RuleId::ProductRule);

        let mut payload = RequestPayload::for_party("Y");
        assert!(!product.matches(&payload));

        payload.product_type = Some("fx_spot".to_string());
        assert!(product.matches(&payload));

        payload.product_type = Some("IRS".to_string());
        assert!(!product.matches(&payload));
    }

    #[test]
    fn test_commodity_exchange_rule() {
        let commodity = rule(RuleId::CommodityExchangeTradeRule);

        let mut payload = RequestPayload::for_party("Y");
        assert!(!commodity.matches(&payload));

        payload.execution_venue = Some("LME".to_string());
        assert!(commodity.matches(&payload));

        payload.execution_venue = Some("XOFF".to_string());
        assert!(!commodity.matches(&payload));

        payload.commodity_exchange_trade = Some(true);
        assert!(commodity.matches(&payload));
    }

    #[test]
    fn test_fallback_is_not_a_rule() {
        assert!(build_rule(RuleId::NoMatchFallback, &ReferenceData::default()).is_none());
    }
}
