//! Workspace-level journey: every upstream dependency fails at once, and a
//! user still gets a complete, internally consistent comparison.

use std::future::Future;
use std::pin::Pin;

use carecost_tests::{
    Arc, CompareOptions, ComparisonInput, ComparisonOrchestrator, GeoResolver, GeoTier,
    HttpClient, HttpError, HttpRequest, HttpResponse, MarketplaceClient, MarketplaceConfig,
    Provenance, RateGate, RateGateConfig, StateCode,
};

struct DeadNetwork;

impl HttpClient for DeadNetwork {
    fn execute<'a>(
        &'a self,
        _request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async { Err(HttpError::new("connection refused")) })
    }
}

#[tokio::test]
async fn full_outage_still_yields_a_usable_comparison_and_county() {
    // Given: no upstream service is reachable and the quota is exhausted
    let http: Arc<dyn HttpClient> = Arc::new(DeadNetwork);
    let gate = Arc::new(RateGate::new(RateGateConfig { max_daily_budget: 0 }));
    let geo = GeoResolver::new(http.clone(), gate);
    let marketplace = MarketplaceClient::new(MarketplaceConfig::new("test-key"), http)
        .expect("test-key is a valid configuration");
    let orchestrator = ComparisonOrchestrator::new(geo, Some(marketplace));

    let input = ComparisonInput::new(
        52,
        "44120",
        StateCode::parse("OH").expect("valid state"),
        2,
        6,
        3,
    )
    .expect("valid input");

    // When: a comparison runs for a non-metro Ohio ZIP
    let result = orchestrator.compare(&input, &CompareOptions::default()).await;

    // Then: both halves are estimated and the math still holds together
    assert_eq!(result.data_source.traditional, Provenance::Estimate);
    assert_eq!(result.data_source.catastrophic, Provenance::Estimate);
    assert!(result.data_source.api_unavailable_reason.is_some());
    assert_eq!(
        result.traditional.annual_total,
        result.traditional.annual_premium + result.traditional.annual_out_of_pocket
    );
    assert_eq!(
        result.annual_savings,
        result.traditional.annual_total - result.dpc.annual_total
    );

    // And: a direct county lookup on the same dead stack degrades to the
    // state default instead of failing
    let geo = GeoResolver::new(
        Arc::new(DeadNetwork),
        Arc::new(RateGate::new(RateGateConfig { max_daily_budget: 0 })),
    );
    let resolution = geo.resolve_county("44120").await;
    assert_eq!(resolution.tier, GeoTier::StateDefault);
    assert_eq!(resolution.county.as_str(), "39049", "OH default is Franklin");
}
