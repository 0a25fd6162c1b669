use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use carecost_core::geo::CountyResolution;
use carecost_core::{GeoResolver, RateGate, ReqwestHttpClient};

use crate::cli::CountyArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct CountyResponseData {
    zip: String,
    county_fips: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    county_name: Option<String>,
    tier: &'static str,
}

impl CountyResponseData {
    fn new(zip: &str, resolution: CountyResolution) -> Self {
        Self {
            zip: zip.to_owned(),
            county_fips: resolution.county.as_str().to_owned(),
            county_name: resolution.county_name,
            tier: resolution.tier.as_str(),
        }
    }
}

pub async fn run(args: &CountyArgs) -> Result<Value, CliError> {
    let geo = GeoResolver::new(
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(RateGate::default()),
    );

    let resolution = geo.resolve_county(&args.zip).await;
    let data = CountyResponseData::new(&args.zip, resolution);

    serde_json::to_value(data).map_err(CliError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carecost_core::geo::GeoTier;
    use carecost_core::CountyId;

    #[test]
    fn county_payload_serializes_with_tier_and_drops_absent_name() {
        let data = CountyResponseData::new(
            "60601",
            CountyResolution {
                county: CountyId::parse("17031").expect("valid fips"),
                tier: GeoTier::FallbackTable,
                county_name: None,
            },
        );

        let json = serde_json::to_value(data).expect("serializes");
        assert_eq!(json["zip"], "60601");
        assert_eq!(json["county_fips"], "17031");
        assert_eq!(json["tier"], "fallback_table");
        assert!(json.get("county_name").is_none());
    }
}
