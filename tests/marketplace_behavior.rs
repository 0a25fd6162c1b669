//! Behavior-driven tests for the marketplace client
//!
//! These tests verify WHAT callers observe: authenticated requests, cached
//! repeats, and one normalized error shape for every failure mode.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use carecost_core::http::{HttpClient, HttpError, HttpRequest, HttpResponse};
use carecost_core::marketplace::{
    EligibilityRequest, Household, MarketplaceClient, MarketplaceConfig, MetalLevel, Person,
    Place, PlanFilter, PlanSearchRequest,
};
use carecost_core::{ConfigError, ZipCode, PLACEHOLDER_API_KEY};

struct RecordingHttpClient {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    fn returning(response: Result<HttpResponse, HttpError>) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("not poisoned").clone()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests.lock().expect("not poisoned").push(request);
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

fn client_with(
    transport: Arc<RecordingHttpClient>,
) -> MarketplaceClient {
    MarketplaceClient::new(MarketplaceConfig::new("test-key"), transport)
        .expect("test-key is a valid configuration")
}

fn texas_search() -> PlanSearchRequest {
    PlanSearchRequest {
        household: Household {
            income: 42_000.0,
            people: vec![Person {
                age: 33,
                uses_tobacco: false,
            }],
        },
        place: Place {
            state: String::from("TX"),
            countyfips: String::from("48201"),
            zipcode: String::from("77001"),
        },
        market: String::from("Individual"),
        year: 2026,
        filter: Some(PlanFilter {
            metal_level: MetalLevel::Silver,
        }),
        limit: 10,
        offset: 0,
    }
}

// =============================================================================
// Journey: authenticated plan search
// =============================================================================

#[tokio::test]
async fn plan_search_is_authenticated_and_repeat_searches_hit_the_cache() {
    // Given: a working marketplace
    let transport = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::ok_json(
        r#"{"plans":[{"id":"p1","name":"Silver Saver","premium":410.0,"metal_level":"Silver"}],"total":1}"#,
    ))));
    let client = client_with(transport.clone());

    // When: the same search runs twice
    let first = client.search_plans(&texas_search()).await.expect("ok");
    let second = client.search_plans(&texas_search()).await.expect("ok");

    // Then: both return the same plans and only one request went out
    assert_eq!(first, second);
    assert_eq!(first.plans.len(), 1);
    let recorded = transport.recorded();
    assert_eq!(recorded.len(), 1, "repeat search must be a cache hit");

    // And: the request carried the key as a query parameter
    assert!(recorded[0].url.contains("/plans/search"));
    assert!(recorded[0].url.contains("apikey=test-key"));
}

#[tokio::test]
async fn caller_can_prescreen_subsidies_through_eligibility_estimates() {
    // Given: an eligibility endpoint returning an APTC figure
    let transport = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::ok_json(
        r#"{"aptc":215.50,"csr":"94","is_medicaid_chip":false}"#,
    ))));
    let client = client_with(transport.clone());

    let request = EligibilityRequest {
        household: Household {
            income: 28_000.0,
            people: vec![Person {
                age: 40,
                uses_tobacco: false,
            }],
        },
        place: Place {
            state: String::from("FL"),
            countyfips: String::from("12086"),
            zipcode: String::from("33101"),
        },
        market: String::from("Individual"),
        year: 2026,
    };

    // When: the estimate is requested
    let estimate = client.eligibility_estimate(&request).await.expect("ok");

    // Then: the subsidy fields come through
    assert_eq!(estimate.aptc, Some(215.50));
    assert_eq!(estimate.csr.as_deref(), Some("94"));
    assert_eq!(estimate.is_medicaid_chip, Some(false));
    assert!(transport.recorded()[0]
        .url
        .contains("/households/eligibility/estimates"));
}

#[tokio::test]
async fn drug_lookups_are_encoded_and_cached_independently() {
    // Given: drug endpoints that answer every lookup
    let transport = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::ok_json(
        r#"{"drugs":[{"name":"metformin","rxcui":"6809","full_name":"metformin 500 MG"}],"coverage":[]}"#,
    ))));
    let client = client_with(transport.clone());

    // When: an autocomplete with a space runs twice, plus a coverage check
    let suggestions = client.autocomplete_drugs("metformin er").await.expect("ok");
    client.autocomplete_drugs("metformin er").await.expect("ok");
    client
        .drug_coverage(
            &[String::from("6809")],
            &[String::from("11111TX0010001")],
        )
        .await
        .expect("ok");

    // Then: the suggestion parsed and the query was percent-encoded
    assert_eq!(suggestions.drugs[0].rxcui.as_deref(), Some("6809"));
    let recorded = transport.recorded();
    assert_eq!(recorded.len(), 2, "repeat autocomplete must be a cache hit");
    assert!(recorded[0].url.contains("q=metformin%20er"));
    assert!(recorded[1].url.contains("/drugs/covered?drugs=6809"));
}

#[tokio::test]
async fn marketplace_county_lookup_resolves_a_zip() {
    // Given: the marketplace's own ZIP -> county mapping
    let transport = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse::ok_json(
        r#"{"counties":[{"fips":"48201","name":"Harris","state":"TX"}]}"#,
    ))));
    let client = client_with(transport.clone());

    // When: a validated ZIP is looked up
    let zip = ZipCode::parse("77001").expect("valid zip");
    let counties = client.county_by_zip(&zip).await.expect("ok");

    // Then: the county comes back and the path embeds the ZIP
    assert_eq!(counties.counties[0].fips.as_deref(), Some("48201"));
    assert!(transport.recorded()[0].url.contains("/counties/by/zip/77001"));
}

// =============================================================================
// Journey: failures normalize to one shape
// =============================================================================

#[tokio::test]
async fn authorization_failure_and_timeout_share_the_same_error_shape() {
    // Given: a marketplace rejecting the key
    let forbidden = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse {
        status: 403,
        body: String::from(r#"{"error":"API key not authorized"}"#),
    })));
    let rejected = client_with(forbidden);

    // And: a marketplace that never answers
    let down = Arc::new(RecordingHttpClient::returning(Err(HttpError::new(
        "request timeout: deadline elapsed",
    ))));
    let unreachable = client_with(down);

    // When: both fail
    let status_err = rejected
        .search_plans(&texas_search())
        .await
        .expect_err("403 must fail");
    let transport_err = unreachable
        .search_plans(&texas_search())
        .await
        .expect_err("timeout must fail");

    // Then: the caller branches on the same fields in both cases
    assert_eq!(status_err.status, 403);
    assert_eq!(status_err.code, "http_status");
    assert!(status_err.details.is_some(), "body excerpt is preserved");

    assert_eq!(transport_err.status, 0, "no response means status zero");
    assert_eq!(transport_err.code, "transport");
    assert!(transport_err.message.contains("timeout"));
}

#[tokio::test]
async fn failed_responses_are_never_cached() {
    // Given: a marketplace rejecting every call
    let transport = Arc::new(RecordingHttpClient::returning(Ok(HttpResponse {
        status: 500,
        body: String::from("internal error"),
    })));
    let client = client_with(transport.clone());

    // When: the same search fails twice
    let request = texas_search();
    client.search_plans(&request).await.expect_err("must fail");
    client.search_plans(&request).await.expect_err("must fail");

    // Then: each attempt went to the network and nothing was stored
    assert_eq!(transport.recorded().len(), 2);
    assert_eq!(client.plan_cache_stats().await.size, 0);
}

#[test]
fn misconfigured_keys_fail_at_construction_not_per_request() {
    // Given: configurations a fresh deployment ships with by accident
    let transport: Arc<dyn HttpClient> =
        Arc::new(carecost_core::http::NoopHttpClient);

    // When/Then: both are rejected before any request can be made
    let empty = MarketplaceClient::new(MarketplaceConfig::new("   "), transport.clone());
    assert_eq!(empty.expect_err("blank key"), ConfigError::EmptyApiKey);

    let placeholder =
        MarketplaceClient::new(MarketplaceConfig::new(PLACEHOLDER_API_KEY), transport);
    assert_eq!(
        placeholder.expect_err("placeholder key"),
        ConfigError::PlaceholderApiKey
    );
}
