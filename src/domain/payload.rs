use crate::error::{EligibilityError, Result};
use serde::Deserialize;

/// Payload contract version understood by this engine.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// A transaction submitted for eligibility evaluation.
///
/// Every field is optional at the type level so that absent data can be told
/// apart from negative data. Structural requirements are enforced by
/// [`RequestPayload::validate`] before any rule sees the payload. Unknown keys
/// in the incoming JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub schema_version: Option<u32>,
    /// The transacting party. Required.
    pub party: Option<String>,
    /// Caller-asserted membership of the recognized-entities registry.
    /// Takes precedence over a registry lookup when present.
    pub in_mas_entities: Option<bool>,
    /// Jurisdiction the transaction is connected to.
    pub nexus: Option<String>,
    /// Counterparty identifier, compared against `party`.
    pub counterparty: Option<String>,
    /// Legal entity identifier of the party.
    pub party_entity: Option<String>,
    /// Legal entity identifier of the counterparty.
    pub counterparty_entity: Option<String>,
    /// Affiliated group of the party.
    pub party_group: Option<String>,
    /// Affiliated group of the counterparty.
    pub counterparty_group: Option<String>,
    pub intra_entity: Option<bool>,
    pub product_type: Option<String>,
    /// Venue or exchange code the trade was executed on.
    pub execution_venue: Option<String>,
    pub commodity_exchange_trade: Option<bool>,
}

impl RequestPayload {
    /// Creates a payload for the given party with every other field absent.
    pub fn for_party(party: impl Into<String>) -> Self {
        Self {
            party: Some(party.into()),
            ..Self::default()
        }
    }

    /// Checks the fields every evaluation depends on.
    pub fn validate(&self) -> Result<()> {
        if let Some(version) = self.schema_version
            && version != SUPPORTED_SCHEMA_VERSION
        {
            return Err(EligibilityError::ValidationError(format!(
                "Unsupported schemaVersion {version}, expected {SUPPORTED_SCHEMA_VERSION}"
            )));
        }

        match self.party.as_deref() {
            Some(party) if !party.trim().is_empty() => Ok(()),
            Some(_) => Err(EligibilityError::ValidationError(
                "Field 'party' must not be blank".to_string(),
            )),
            None => Err(EligibilityError::ValidationError(
                "Missing required field 'party'".to_string(),
            )),
        }
    }

    /// The party identifier, or an empty string on an unvalidated payload.
    pub fn party_id(&self) -> &str {
        self.party.as_deref().unwrap_or_default()
    }

    /// True when both sides name the same party, carry the same legal
    /// entity, or belong to the same affiliated group.
    pub fn counterparties_share_entity(&self) -> bool {
        same_identifier(&self.party, &self.counterparty)
            || same_identifier(&self.party_entity, &self.counterparty_entity)
            || same_identifier(&self.party_group, &self.counterparty_group)
    }
}

/// Canonical form used for every comparison against reference lists.
pub fn normalize(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}

fn same_identifier(left: &Option<String>, right: &Option<String>) -> bool {
    match (left.as_deref(), right.as_deref()) {
        (Some(l), Some(r)) => {
            let l = normalize(l);
            !l.is_empty() && l == normalize(r)
        }
        _ => false,
    }
}
