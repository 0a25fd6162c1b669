use std::sync::Arc;

use serde_json::Value;

use carecost_core::{
    validate_coverage_year, CompareOptions, ComparisonInput, ComparisonOrchestrator, GeoResolver,
    MarketplaceClient, MarketplaceConfig, RateGate, ReqwestHttpClient, StateCode,
};

use crate::cli::CompareArgs;
use crate::error::CliError;

const API_KEY_ENV: &str = "MARKETPLACE_API_KEY";

pub async fn run(args: &CompareArgs) -> Result<Value, CliError> {
    let state = StateCode::parse(&args.state)?;
    if let Some(year) = args.year {
        validate_coverage_year(year)?;
    }

    let input = ComparisonInput::new(
        args.age,
        args.zip.clone(),
        state,
        args.conditions,
        args.visits,
        args.prescriptions,
    )?;

    let options = CompareOptions {
        income: args.income,
        year: args.year,
        use_api_data: if args.no_api { Some(false) } else { None },
    };

    let http = Arc::new(ReqwestHttpClient::new());
    let geo = GeoResolver::new(http.clone(), Arc::new(RateGate::default()));

    // No key means no client; the orchestrator degrades to estimates and
    // records why.
    let marketplace = match resolve_api_key(args) {
        Some(key) => Some(MarketplaceClient::new(MarketplaceConfig::new(key), http)?),
        None => None,
    };

    let orchestrator = ComparisonOrchestrator::new(geo, marketplace);
    let result = orchestrator.compare(&input, &options).await;

    serde_json::to_value(&result).map_err(CliError::from)
}

fn resolve_api_key(args: &CompareArgs) -> Option<String> {
    args.api_key
        .clone()
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|key| !key.trim().is_empty())
}
