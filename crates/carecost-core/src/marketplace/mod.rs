//! Authenticated client for the federal benefits-marketplace API.
//!
//! Every lookup is TTL-cached keyed by its serialized request, and every
//! failure mode (non-2xx status, transport error, body decode) collapses
//! into one [`ApiError`] shape so callers never branch on the transport.

mod types;

pub use types::{
    Benefit, CostSharing, CountiesResponse, DrugCoverage, DrugCoverageResponse, DrugSuggestion,
    DrugSuggestions, EligibilityEstimate, EligibilityRequest, Household, MarketplaceCounty,
    MetalLevel, Person, Place, Plan, PlanFilter, PlanSearchRequest, PlanSearchResponse,
};

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::cache::{CacheStats, TtlCache};
use crate::http::{HttpClient, HttpError, HttpRequest};
use crate::{ConfigError, ZipCode};

/// Placeholder shipped in sample configuration; construction rejects it.
pub const PLACEHOLDER_API_KEY: &str = "your-marketplace-api-key";

const PLAN_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DRUG_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
const COUNTY_CACHE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Normalized marketplace failure: one shape regardless of whether the
/// call failed in transport, with a non-2xx status, or while decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status, or 0 when the failure never produced a response.
    pub status: u16,
    pub code: &'static str,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn transport(error: HttpError) -> Self {
        Self {
            status: 0,
            code: "transport",
            message: format!("marketplace transport error: {}", error.message()),
            details: None,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            code: "http_status",
            message: format!("marketplace returned status {status}"),
            details: Some(truncate(body, 200)),
        }
    }

    pub fn decode(error: serde_json::Error) -> Self {
        Self {
            status: 0,
            code: "decode",
            message: format!("failed to decode marketplace response: {error}"),
            details: None,
        }
    }

    pub fn encode(error: serde_json::Error) -> Self {
        Self {
            status: 0,
            code: "encode",
            message: format!("failed to encode marketplace request: {error}"),
            details: None,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for ApiError {}

fn truncate(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_owned();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// Marketplace endpoint and cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_ms: u64,
}

impl MarketplaceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: String::from("https://marketplace.api.healthcare.gov/api/v1"),
            api_key: api_key.into(),
            timeout_ms: 10_000,
        }
    }
}

/// Authenticated, caching marketplace client.
///
/// The API key travels as an `apikey` query parameter on every request.
/// Construction fails fast on an empty or placeholder key so that
/// misconfiguration is visible at startup, not masked as per-request
/// fallbacks.
pub struct MarketplaceClient {
    config: MarketplaceConfig,
    http_client: Arc<dyn HttpClient>,
    plan_cache: TtlCache<String>,
    drug_cache: TtlCache<String>,
    county_cache: TtlCache<String>,
}

impl Debug for MarketplaceClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketplaceClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MarketplaceClient {
    pub fn new(
        config: MarketplaceConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        let key = config.api_key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::PlaceholderApiKey);
        }

        Ok(Self {
            config,
            http_client,
            plan_cache: TtlCache::new(PLAN_CACHE_TTL),
            drug_cache: TtlCache::new(DRUG_CACHE_TTL),
            county_cache: TtlCache::new(COUNTY_CACHE_TTL),
        })
    }

    /// Search qualified health plans for a household and place.
    pub async fn search_plans(
        &self,
        request: &PlanSearchRequest,
    ) -> Result<PlanSearchResponse, ApiError> {
        let body = encode_request(request)?;
        let cache_key = format!("plans:search:{body}");
        let url = self.with_api_key(format!("{}/plans/search", self.config.base_url));
        let http = HttpRequest::post_json(url, body).with_timeout_ms(self.config.timeout_ms);

        let raw = self.cached_call(&self.plan_cache, &cache_key, http).await?;
        serde_json::from_str(&raw).map_err(ApiError::decode)
    }

    /// Household subsidy/eligibility pre-screen.
    pub async fn eligibility_estimate(
        &self,
        request: &EligibilityRequest,
    ) -> Result<EligibilityEstimate, ApiError> {
        let body = encode_request(request)?;
        let cache_key = format!("eligibility:{body}");
        let url = self.with_api_key(format!(
            "{}/households/eligibility/estimates",
            self.config.base_url
        ));
        let http = HttpRequest::post_json(url, body).with_timeout_ms(self.config.timeout_ms);

        let raw = self.cached_call(&self.plan_cache, &cache_key, http).await?;
        serde_json::from_str(&raw).map_err(ApiError::decode)
    }

    /// Drug name autocomplete.
    pub async fn autocomplete_drugs(&self, query: &str) -> Result<DrugSuggestions, ApiError> {
        let cache_key = format!("drugs:autocomplete:{query}");
        let url = self.with_api_key(format!(
            "{}/drugs/autocomplete?q={}",
            self.config.base_url,
            urlencoding::encode(query)
        ));
        let http = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);

        let raw = self.cached_call(&self.drug_cache, &cache_key, http).await?;
        serde_json::from_str(&raw).map_err(ApiError::decode)
    }

    /// Whether specific drugs are covered by specific plans.
    pub async fn drug_coverage(
        &self,
        rxcuis: &[String],
        plan_ids: &[String],
    ) -> Result<DrugCoverageResponse, ApiError> {
        let drugs = rxcuis.join(",");
        let plans = plan_ids.join(",");
        let cache_key = format!("drugs:covered:{drugs}:{plans}");
        let url = self.with_api_key(format!(
            "{}/drugs/covered?drugs={}&planids={}",
            self.config.base_url,
            urlencoding::encode(&drugs),
            urlencoding::encode(&plans)
        ));
        let http = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);

        let raw = self.cached_call(&self.drug_cache, &cache_key, http).await?;
        serde_json::from_str(&raw).map_err(ApiError::decode)
    }

    /// Counties covering a ZIP, as the marketplace itself maps them.
    pub async fn county_by_zip(&self, zip: &ZipCode) -> Result<CountiesResponse, ApiError> {
        let cache_key = format!("counties:zip:{zip}");
        let url = self.with_api_key(format!(
            "{}/counties/by/zip/{}",
            self.config.base_url,
            zip.as_str()
        ));
        let http = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);

        let raw = self
            .cached_call(&self.county_cache, &cache_key, http)
            .await?;
        serde_json::from_str(&raw).map_err(ApiError::decode)
    }

    /// Plan-cache snapshot, used by callers observing cache behavior.
    pub async fn plan_cache_stats(&self) -> CacheStats {
        self.plan_cache.stats().await
    }

    pub async fn clear_caches(&self) {
        self.plan_cache.clear().await;
        self.drug_cache.clear().await;
        self.county_cache.clear().await;
    }

    /// Check cache, then fetch; only successful raw bodies are cached.
    async fn cached_call(
        &self,
        cache: &TtlCache<String>,
        cache_key: &str,
        request: HttpRequest,
    ) -> Result<String, ApiError> {
        if let Some(body) = cache.get(cache_key).await {
            return Ok(body);
        }

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(ApiError::transport)?;

        if !response.is_success() {
            return Err(ApiError::status(response.status, &response.body));
        }

        cache.insert(cache_key, response.body.clone()).await;
        Ok(response.body)
    }

    fn with_api_key(&self, endpoint: String) -> String {
        if endpoint.contains('?') {
            format!("{endpoint}&apikey={}", self.config.api_key)
        } else {
            format!("{endpoint}?apikey={}", self.config.api_key)
        }
    }
}

fn encode_request<T: Serialize>(request: &T) -> Result<String, ApiError> {
    serde_json::to_string(request).map_err(ApiError::encode)
}
