//! Top-level cost-comparison orchestration.
//!
//! `compare` always reaches a fully populated result: each half of the
//! comparison independently uses live marketplace pricing when available
//! and degrades to the static estimators otherwise. The only observable
//! trace of degradation is the `DataSourceRecord`, never an error.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::estimator::{self, CostBreakdown};
use crate::geo::{CountyResolution, GeoResolver};
use crate::marketplace::{
    Household, MarketplaceClient, MetalLevel, Person, Place, Plan, PlanFilter, PlanSearchRequest,
};
use crate::{MarketplaceType, StateCode, ValidationError};

const DEFAULT_COVERAGE_YEAR: u16 = 2026;
const DEFAULT_ANNUAL_INCOME: f64 = 45_000.0;
/// Assumed billed cost of a primary-care visit, for coinsurance math.
const ASSUMED_VISIT_COST: f64 = 150.0;
/// Assumed monthly billed cost of a generic prescription.
const ASSUMED_DRUG_COST: f64 = 60.0;
/// Visit cost when a plan reports no usable cost sharing at all.
const DEFAULT_VISIT_COST: f64 = 100.0;
/// Monthly drug cost when a plan reports no usable cost sharing at all.
const DEFAULT_DRUG_COST: f64 = 25.0;
const PLAN_SEARCH_LIMIT: u32 = 10;

/// Consumer profile for a comparison request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonInput {
    pub age: u8,
    pub zip_code: String,
    pub state: StateCode,
    pub chronic_conditions: u8,
    pub annual_doctor_visits: u16,
    pub prescription_count: u16,
}

impl ComparisonInput {
    pub fn new(
        age: u8,
        zip_code: impl Into<String>,
        state: StateCode,
        chronic_conditions: u8,
        annual_doctor_visits: u16,
        prescription_count: u16,
    ) -> Result<Self, ValidationError> {
        if age > 120 {
            return Err(ValidationError::AgeOutOfRange { value: age });
        }
        Ok(Self {
            age,
            zip_code: zip_code.into(),
            state,
            chronic_conditions,
            annual_doctor_visits,
            prescription_count,
        })
    }
}

/// Per-request knobs; `None` fields use documented defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct CompareOptions {
    pub income: Option<f64>,
    pub year: Option<u16>,
    /// `Some(false)` disables the live marketplace path outright.
    pub use_api_data: Option<bool>,
}

/// Validate a coverage year before it reaches a marketplace request.
pub fn validate_coverage_year(year: u16) -> Result<u16, ValidationError> {
    if !(2014..=2100).contains(&year) {
        return Err(ValidationError::YearOutOfRange { value: year });
    }
    Ok(year)
}

/// Where one half of the comparison came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Api,
    Estimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedPlan {
    Dpc,
    Traditional,
}

/// Provenance record attached to every result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSourceRecord {
    pub traditional: Provenance,
    pub catastrophic: Provenance,
    pub marketplace_type: MarketplaceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_unavailable_reason: Option<String>,
}

/// The externally visible artifact: both cost breakdowns, the savings
/// math, and the provenance record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub traditional: CostBreakdown,
    pub dpc: CostBreakdown,
    pub annual_savings: f64,
    pub percentage_savings: f64,
    pub recommended_plan: RecommendedPlan,
    pub data_source: DataSourceRecord,
}

/// Coordinates geo resolution, marketplace lookups, and estimator
/// fallbacks. Owns its resolver and optional client; no process-wide
/// state, so parallel instances are fully isolated.
pub struct ComparisonOrchestrator {
    geo: GeoResolver,
    marketplace: Option<MarketplaceClient>,
}

impl ComparisonOrchestrator {
    pub fn new(geo: GeoResolver, marketplace: Option<MarketplaceClient>) -> Self {
        Self { geo, marketplace }
    }

    /// Estimator-only orchestrator; never touches the network for pricing.
    pub fn offline(geo: GeoResolver) -> Self {
        Self::new(geo, None)
    }

    /// Run a comparison. Never errors: any failure on the live path
    /// switches the affected half to the estimator.
    pub async fn compare(
        &self,
        input: &ComparisonInput,
        options: &CompareOptions,
    ) -> ComparisonResult {
        let marketplace_type = input.state.marketplace_type();
        let traditional_estimate = estimator::estimate_traditional(
            input.age,
            &input.state,
            input.chronic_conditions,
            input.annual_doctor_visits,
            input.prescription_count,
        );
        let dpc_estimate = estimator::estimate_dpc(
            input.age,
            &input.state,
            input.chronic_conditions,
            input.annual_doctor_visits,
            input.prescription_count,
        );

        if options.use_api_data == Some(false) {
            return finish(
                traditional_estimate,
                dpc_estimate,
                Provenance::Estimate,
                Provenance::Estimate,
                marketplace_type,
                Some(String::from("live marketplace data disabled for this request")),
            );
        }

        let Some(client) = self.marketplace.as_ref() else {
            return finish(
                traditional_estimate,
                dpc_estimate,
                Provenance::Estimate,
                Provenance::Estimate,
                marketplace_type,
                Some(String::from("marketplace client is not configured")),
            );
        };

        if !marketplace_type.served_by_federal_platform() {
            return finish(
                traditional_estimate,
                dpc_estimate,
                Provenance::Estimate,
                Provenance::Estimate,
                marketplace_type,
                Some(format!(
                    "{} operates a state-run exchange; its plans are not served by the federal marketplace API",
                    input.state
                )),
            );
        }

        let resolution = self.geo.resolve_county(&input.zip_code).await;
        let year = options.year.unwrap_or(DEFAULT_COVERAGE_YEAR);
        let income = options.income.unwrap_or(DEFAULT_ANNUAL_INCOME);

        let traditional_live = live_breakdown(
            client,
            input,
            &resolution,
            MetalLevel::Silver,
            year,
            income,
        )
        .await;
        let catastrophic_live = live_breakdown(
            client,
            input,
            &resolution,
            MetalLevel::Catastrophic,
            year,
            income,
        )
        .await;

        let mut reasons = Vec::new();
        let (traditional, traditional_src) = match traditional_live {
            Ok(breakdown) => (breakdown, Provenance::Api),
            Err(reason) => {
                reasons.push(reason);
                (traditional_estimate, Provenance::Estimate)
            }
        };
        let (dpc, catastrophic_src) = match catastrophic_live {
            Ok(breakdown) => (breakdown, Provenance::Api),
            Err(reason) => {
                reasons.push(reason);
                (dpc_estimate, Provenance::Estimate)
            }
        };

        let reason = if reasons.is_empty() {
            None
        } else {
            Some(reasons.join("; "))
        };

        finish(
            traditional,
            dpc,
            traditional_src,
            catastrophic_src,
            marketplace_type,
            reason,
        )
    }
}

/// Fetch and extract one half of the comparison. Single attempt: any
/// failure is returned as the fallback reason, never retried.
async fn live_breakdown(
    client: &MarketplaceClient,
    input: &ComparisonInput,
    resolution: &CountyResolution,
    tier: MetalLevel,
    year: u16,
    income: f64,
) -> Result<CostBreakdown, String> {
    let request = build_search_request(input, resolution, tier, year, income);
    let response = client
        .search_plans(&request)
        .await
        .map_err(|error| error.to_string())?;

    let plan = response
        .plans
        .iter()
        .find(|plan| plan.has_required_fields())
        .ok_or_else(|| format!("no valid {} plan in marketplace response", tier.as_str()))?;

    Ok(match tier {
        MetalLevel::Catastrophic => dpc_breakdown_from_plan(plan, input),
        _ => traditional_breakdown_from_plan(plan, input),
    })
}

fn build_search_request(
    input: &ComparisonInput,
    resolution: &CountyResolution,
    tier: MetalLevel,
    year: u16,
    income: f64,
) -> PlanSearchRequest {
    PlanSearchRequest {
        household: Household {
            income,
            people: vec![Person {
                age: input.age,
                uses_tobacco: false,
            }],
        },
        place: Place {
            state: input.state.as_str().to_owned(),
            countyfips: resolution.county.as_str().to_owned(),
            zipcode: input.zip_code.clone(),
        },
        market: String::from("Individual"),
        year,
        filter: Some(PlanFilter { metal_level: tier }),
        limit: PLAN_SEARCH_LIMIT,
        offset: 0,
    }
}

fn traditional_breakdown_from_plan(plan: &Plan, input: &ComparisonInput) -> CostBreakdown {
    let premium = plan.premium.unwrap_or(0.0);
    let visit_cost = benefit_unit_cost(plan, "primary care", ASSUMED_VISIT_COST, DEFAULT_VISIT_COST);
    let drug_cost = benefit_unit_cost(plan, "generic drugs", ASSUMED_DRUG_COST, DEFAULT_DRUG_COST);

    let out_of_pocket = f64::from(input.annual_doctor_visits) * visit_cost
        + f64::from(input.prescription_count) * 12.0 * drug_cost;

    CostBreakdown::from_monthly(premium, out_of_pocket)
}

/// The DPC half pairs the live catastrophic premium with the membership
/// fee; primary-care visits are covered by the membership.
fn dpc_breakdown_from_plan(plan: &Plan, input: &ComparisonInput) -> CostBreakdown {
    let premium = plan.premium.unwrap_or(0.0) + estimator::dpc_membership_monthly(input.age);
    let drug_cost = benefit_unit_cost(plan, "generic drugs", ASSUMED_DRUG_COST, DEFAULT_DRUG_COST);

    let out_of_pocket = f64::from(input.prescription_count) * 12.0 * drug_cost;

    CostBreakdown::from_monthly(premium, out_of_pocket)
}

/// Documented parsing order for a benefit's cost sharing: structured
/// copay, then a dollar amount regexed out of the display string, then a
/// coinsurance fraction (or display percentage) against the assumed
/// billed cost, then the hardcoded default.
fn benefit_unit_cost(plan: &Plan, name_fragment: &str, assumed_base: f64, default_cost: f64) -> f64 {
    let Some(benefit) = plan.benefits.iter().find(|benefit| {
        benefit
            .name
            .as_deref()
            .is_some_and(|name| name.to_ascii_lowercase().contains(name_fragment))
    }) else {
        return default_cost;
    };

    let Some(sharing) = benefit.cost_sharings.first() else {
        return default_cost;
    };

    if let Some(copay) = sharing.copay_amount {
        if copay > 0.0 {
            return copay;
        }
    }

    if let Some(display) = sharing.display_string.as_deref() {
        if let Some(amount) = extract_dollar_amount(display) {
            return amount;
        }
    }

    if let Some(rate) = sharing.coinsurance_rate {
        if rate > 0.0 {
            return rate * assumed_base;
        }
    }

    if let Some(display) = sharing.display_string.as_deref() {
        if let Some(percent) = extract_percentage(display) {
            return percent / 100.0 * assumed_base;
        }
    }

    default_cost
}

fn extract_dollar_amount(text: &str) -> Option<f64> {
    static DOLLAR_RE: OnceLock<Regex> = OnceLock::new();
    let re = DOLLAR_RE.get_or_init(|| {
        Regex::new(r"\$\s*([0-9]+(?:\.[0-9]{1,2})?)").expect("dollar pattern is valid")
    });
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn extract_percentage(text: &str) -> Option<f64> {
    static PERCENT_RE: OnceLock<Regex> = OnceLock::new();
    let re = PERCENT_RE.get_or_init(|| {
        Regex::new(r"([0-9]{1,3})\s*%").expect("percent pattern is valid")
    });
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn finish(
    traditional: CostBreakdown,
    dpc: CostBreakdown,
    traditional_src: Provenance,
    catastrophic_src: Provenance,
    marketplace_type: MarketplaceType,
    api_unavailable_reason: Option<String>,
) -> ComparisonResult {
    let annual_savings = traditional.annual_total - dpc.annual_total;
    let percentage_savings = if traditional.annual_total > 0.0 {
        annual_savings / traditional.annual_total * 100.0
    } else {
        0.0
    };
    // A tie resolves to the traditional plan.
    let recommended_plan = if annual_savings > 0.0 {
        RecommendedPlan::Dpc
    } else {
        RecommendedPlan::Traditional
    };

    ComparisonResult {
        traditional,
        dpc,
        annual_savings,
        percentage_savings,
        recommended_plan,
        data_source: DataSourceRecord {
            traditional: traditional_src,
            catastrophic: catastrophic_src,
            marketplace_type,
            api_unavailable_reason,
        },
    }
}
