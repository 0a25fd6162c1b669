//! Marketplace API request and response payloads.
//!
//! Responses deserialize into option-heavy structs and pass an explicit
//! required-field check before the orchestrator accepts them, so an
//! invalid plan degrades deterministically instead of panicking deep in
//! field access.

use serde::{Deserialize, Serialize};

/// One covered person in the household.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub age: u8,
    pub uses_tobacco: bool,
}

/// Household composition sent with plan searches and eligibility checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Household {
    pub income: f64,
    pub people: Vec<Person>,
}

/// Coverage location: state, county FIPS, ZIP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub state: String,
    pub countyfips: String,
    pub zipcode: String,
}

/// Marketplace metal tiers. Serialized capitalized, as the API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetalLevel {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Catastrophic,
}

impl MetalLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
            Self::Catastrophic => "Catastrophic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanFilter {
    pub metal_level: MetalLevel,
}

/// Full plan-search request; its serialized form doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSearchRequest {
    pub household: Household,
    pub place: Place,
    pub market: String,
    pub year: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<PlanFilter>,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanSearchResponse {
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Plan {
    pub id: Option<String>,
    pub name: Option<String>,
    pub premium: Option<f64>,
    pub metal_level: Option<String>,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
}

impl Plan {
    /// Required-field schema check applied before a plan is accepted.
    pub fn has_required_fields(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
            && self.name.as_deref().is_some_and(|name| !name.is_empty())
            && self
                .premium
                .is_some_and(|premium| premium.is_finite() && premium >= 0.0)
            && self.metal_level.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Benefit {
    pub name: Option<String>,
    #[serde(default)]
    pub cost_sharings: Vec<CostSharing>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CostSharing {
    pub copay_amount: Option<f64>,
    pub coinsurance_rate: Option<f64>,
    pub display_string: Option<String>,
}

/// Eligibility pre-screen request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityRequest {
    pub household: Household,
    pub place: Place,
    pub market: String,
    pub year: u16,
}

/// Advance premium tax credit / cost-sharing-reduction estimate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EligibilityEstimate {
    pub aptc: Option<f64>,
    pub csr: Option<String>,
    pub is_medicaid_chip: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DrugSuggestions {
    #[serde(default)]
    pub drugs: Vec<DrugSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DrugSuggestion {
    pub name: Option<String>,
    pub rxcui: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DrugCoverageResponse {
    #[serde(default)]
    pub coverage: Vec<DrugCoverage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DrugCoverage {
    pub plan_id: Option<String>,
    pub rxcui: Option<String>,
    pub coverage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountiesResponse {
    #[serde(default)]
    pub counties: Vec<MarketplaceCounty>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketplaceCounty {
    pub fips: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
}
