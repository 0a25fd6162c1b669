//! ZIP -> county resolution through a tiered cache/lookup cascade.
//!
//! The external geocoder has an undocumented ~2,500/day quota and
//! occasional multi-second latency, so county resolution trades accuracy
//! for availability as tiers degrade. `resolve_county` never fails and
//! never blocks the comparison flow on an exhausted quota.

mod tables;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::cache::{CacheStats, TtlCache};
use crate::http::{HttpClient, HttpRequest, NoopHttpClient};
use crate::rate_gate::RateGate;
use crate::{CountyId, ZipCode};

const GEO_CACHE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Which cascade tier produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoTier {
    RuntimeCache,
    FallbackTable,
    Geocoder,
    StateDefault,
}

impl GeoTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RuntimeCache => "runtime_cache",
            Self::FallbackTable => "fallback_table",
            Self::Geocoder => "geocoder",
            Self::StateDefault => "state_default",
        }
    }
}

/// Resolution outcome: always a usable county, plus provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyResolution {
    pub county: CountyId,
    pub tier: GeoTier,
    /// County display name, known only when the geocoder answered.
    pub county_name: Option<String>,
}

/// Geocoder endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoResolverConfig {
    pub endpoint: String,
    pub benchmark: String,
    pub vintage: String,
    pub timeout_ms: u64,
}

impl Default for GeoResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from(
                "https://geocoding.geo.census.gov/geocoder/locations/onelineaddress",
            ),
            benchmark: String::from("Public_AR_Current"),
            vintage: String::from("Current_Current"),
            timeout_ms: 10_000,
        }
    }
}

/// Resolves a ZIP code to a county identifier through a 4-tier cascade:
/// runtime cache, static metro table, rate-gated live geocoding, and a
/// per-state default.
///
/// Only tier-3 (geocoder) successes are written back into the runtime
/// cache; coarse tier-2/tier-4 answers are not, so they can never shadow a
/// later live resolution.
pub struct GeoResolver {
    config: GeoResolverConfig,
    http_client: Arc<dyn HttpClient>,
    rate_gate: Arc<RateGate>,
    runtime_cache: TtlCache<CountyId>,
    fallback_table: HashMap<String, CountyId>,
}

impl Default for GeoResolver {
    fn default() -> Self {
        Self::new(Arc::new(NoopHttpClient), Arc::new(RateGate::default()))
    }
}

impl GeoResolver {
    pub fn new(http_client: Arc<dyn HttpClient>, rate_gate: Arc<RateGate>) -> Self {
        Self {
            config: GeoResolverConfig::default(),
            http_client,
            rate_gate,
            runtime_cache: TtlCache::new(GEO_CACHE_TTL),
            fallback_table: tables::metro_fallback_table(),
        }
    }

    pub fn with_config(mut self, config: GeoResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the static fallback table (tier 2). Tests pass an empty map
    /// to force the cascade past it.
    pub fn with_fallback_table(mut self, entries: HashMap<String, CountyId>) -> Self {
        self.fallback_table = entries;
        self
    }

    /// Runtime-cache snapshot; lets callers observe tier-1 population.
    pub async fn runtime_cache_stats(&self) -> CacheStats {
        self.runtime_cache.stats().await
    }

    /// Resolve a ZIP to a county identifier. Never fails: malformed input
    /// and every upstream failure degrade to the state-default tier.
    pub async fn resolve_county(&self, zip: &str) -> CountyResolution {
        let Ok(zip) = ZipCode::parse(zip) else {
            // Malformed input: fail fast with no cache or network traffic.
            return self.state_default(zip.trim());
        };

        if let Some(county) = self.runtime_cache.get(zip.as_str()).await {
            return CountyResolution {
                county,
                tier: GeoTier::RuntimeCache,
                county_name: None,
            };
        }

        if let Some(county) = self.fallback_table.get(zip.as_str()) {
            return CountyResolution {
                county: county.clone(),
                tier: GeoTier::FallbackTable,
                county_name: None,
            };
        }

        if self.rate_gate.try_consume() {
            if let Some((county, name)) = self.geocode(&zip).await {
                self.runtime_cache.insert(zip.as_str(), county.clone()).await;
                return CountyResolution {
                    county,
                    tier: GeoTier::Geocoder,
                    county_name: Some(name),
                };
            }
        }

        self.state_default(zip.as_str())
    }

    /// Tier 3: county-level geocoding with the ZIP as a one-line
    /// pseudo-address. Any transport error, non-2xx status, zero-match
    /// body, or parse failure is a `None`, which falls through to tier 4.
    async fn geocode(&self, zip: &ZipCode) -> Option<(CountyId, String)> {
        let url = format!(
            "{}?address={}&benchmark={}&vintage={}&layers=Counties&format=json",
            self.config.endpoint,
            urlencoding::encode(zip.as_str()),
            urlencoding::encode(&self.config.benchmark),
            urlencoding::encode(&self.config.vintage),
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.ok()?;
        if !response.is_success() {
            return None;
        }

        let parsed: GeocoderResponse = serde_json::from_str(&response.body).ok()?;
        let matched = parsed.result?.address_matches.into_iter().next()?;
        let county = matched.geographies?.counties.into_iter().next()?;
        let id = CountyId::from_parts(&county.state, &county.county).ok()?;

        Some((id, county.basename))
    }

    /// Tier 4: state inferred from the ZIP prefix, mapped to that state's
    /// most populous county. Always succeeds.
    fn state_default(&self, zip: &str) -> CountyResolution {
        let prefix = zip.get(..2).unwrap_or("");
        let state = tables::state_for_zip_prefix(prefix).unwrap_or(tables::DEFAULT_STATE);
        let fips = tables::default_county_for_state(state)
            .unwrap_or_else(|| {
                tables::default_county_for_state(tables::DEFAULT_STATE)
                    .expect("default state has a default county")
            });

        CountyResolution {
            county: CountyId::parse(fips).expect("default county tables are valid"),
            tier: GeoTier::StateDefault,
            county_name: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocoderResponse {
    result: Option<GeocoderResult>,
}

#[derive(Debug, Deserialize)]
struct GeocoderResult {
    #[serde(rename = "addressMatches", default)]
    address_matches: Vec<AddressMatch>,
}

#[derive(Debug, Deserialize)]
struct AddressMatch {
    geographies: Option<Geographies>,
}

#[derive(Debug, Deserialize)]
struct Geographies {
    #[serde(rename = "Counties", default)]
    counties: Vec<CountyGeography>,
}

#[derive(Debug, Deserialize)]
struct CountyGeography {
    #[serde(rename = "STATE")]
    state: String,
    #[serde(rename = "COUNTY")]
    county: String,
    #[serde(rename = "BASENAME", default)]
    basename: String,
}
