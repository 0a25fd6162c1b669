//! Core engine for carecost.
//!
//! This crate contains:
//! - Validated domain identifiers (ZIP, county FIPS, state codes)
//! - The tiered geographic resolver with its rate gate and caches
//! - The healthcare.gov marketplace client with error normalization
//! - Static cost estimators and the comparison orchestrator

pub mod cache;
pub mod comparison;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod geo;
pub mod http;
pub mod marketplace;
pub mod rate_gate;

pub use cache::{CacheStats, TtlCache};
pub use comparison::{
    validate_coverage_year, CompareOptions, ComparisonInput, ComparisonOrchestrator,
    ComparisonResult, DataSourceRecord, Provenance, RecommendedPlan,
};
pub use domain::{CountyId, MarketplaceType, StateCode, ZipCode};
pub use error::{ConfigError, CoreError, ValidationError};
pub use estimator::CostBreakdown;
pub use geo::{CountyResolution, GeoResolver, GeoResolverConfig, GeoTier};
pub use http::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use marketplace::{ApiError, MarketplaceClient, MarketplaceConfig, PLACEHOLDER_API_KEY};
pub use rate_gate::{RateGate, RateGateConfig, DEFAULT_MAX_DAILY_BUDGET};
