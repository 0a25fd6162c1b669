//! Static cost estimators: the bottom of every fallback chain.
//!
//! Pure arithmetic over age bands, a per-state cost factor, and reported
//! utilization. Deterministic by construction, so a degraded comparison is
//! byte-stable across identical requests.

use serde::Serialize;

use crate::StateCode;

/// Assumed cash price of a primary-care visit under traditional coverage.
const TRADITIONAL_VISIT_COPAY: f64 = 30.0;
/// Assumed monthly cost per prescription at retail pricing.
const TRADITIONAL_MONTHLY_RX_COST: f64 = 20.0;
/// Assumed monthly cost per prescription at DPC wholesale pricing.
const DPC_MONTHLY_RX_COST: f64 = 15.0;
/// Annual extra out-of-pocket per chronic condition, traditional coverage.
const TRADITIONAL_CHRONIC_ANNUAL_COST: f64 = 400.0;
/// Annual extra out-of-pocket per chronic condition under DPC management.
const DPC_CHRONIC_ANNUAL_COST: f64 = 250.0;
/// Catastrophic premiums run well below the traditional benchmark.
const CATASTROPHIC_PREMIUM_RATIO: f64 = 0.45;

/// Numeric cost breakdown for one plan type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub monthly_premium: f64,
    pub annual_premium: f64,
    pub annual_out_of_pocket: f64,
    pub annual_total: f64,
}

impl CostBreakdown {
    pub fn from_monthly(monthly_premium: f64, annual_out_of_pocket: f64) -> Self {
        let annual_premium = monthly_premium * 12.0;
        Self {
            monthly_premium,
            annual_premium,
            annual_out_of_pocket,
            annual_total: annual_premium + annual_out_of_pocket,
        }
    }
}

/// Estimate annual costs on a traditional marketplace-style plan.
pub fn estimate_traditional(
    age: u8,
    state: &StateCode,
    chronic_conditions: u8,
    annual_doctor_visits: u16,
    prescription_count: u16,
) -> CostBreakdown {
    let monthly = base_monthly_premium(age) * state_cost_factor(state);
    let out_of_pocket = f64::from(annual_doctor_visits) * TRADITIONAL_VISIT_COPAY
        + f64::from(prescription_count) * 12.0 * TRADITIONAL_MONTHLY_RX_COST
        + f64::from(chronic_conditions) * TRADITIONAL_CHRONIC_ANNUAL_COST;

    CostBreakdown::from_monthly(monthly, out_of_pocket)
}

/// Estimate annual costs on a DPC membership plus catastrophic plan.
///
/// Primary-care visits are covered by the membership, so visit count does
/// not contribute to out-of-pocket costs on this side.
pub fn estimate_dpc(
    age: u8,
    state: &StateCode,
    chronic_conditions: u8,
    _annual_doctor_visits: u16,
    prescription_count: u16,
) -> CostBreakdown {
    let catastrophic_monthly =
        base_monthly_premium(age) * state_cost_factor(state) * CATASTROPHIC_PREMIUM_RATIO;
    let monthly = catastrophic_monthly + dpc_membership_monthly(age);
    let out_of_pocket = f64::from(prescription_count) * 12.0 * DPC_MONTHLY_RX_COST
        + f64::from(chronic_conditions) * DPC_CHRONIC_ANNUAL_COST;

    CostBreakdown::from_monthly(monthly, out_of_pocket)
}

/// Typical DPC membership fee by age band.
pub fn dpc_membership_monthly(age: u8) -> f64 {
    match age {
        0..=29 => 75.0,
        30..=49 => 85.0,
        _ => 110.0,
    }
}

fn base_monthly_premium(age: u8) -> f64 {
    match age {
        0..=17 => 180.0,
        18..=25 => 240.0,
        26..=34 => 310.0,
        35..=44 => 380.0,
        45..=54 => 490.0,
        55..=64 => 640.0,
        _ => 750.0,
    }
}

fn state_cost_factor(state: &StateCode) -> f64 {
    match state.as_str() {
        "AK" => 1.40,
        "NY" => 1.30,
        "CA" | "WV" | "WY" => 1.25,
        "MA" | "VT" | "CT" => 1.20,
        "NJ" | "IL" => 1.10,
        "NM" | "MN" | "MI" => 0.90,
        _ => 1.00,
    }
}
