//! Static geography tables backing cascade tiers 2 and 4.

use std::collections::HashMap;

use crate::CountyId;

/// Hard-coded default when even the state cannot be inferred from the ZIP.
pub(crate) const DEFAULT_STATE: &str = "CA";

/// Hand-curated ZIP -> county FIPS pairs for a handful of major metros.
/// Exact match only; deliberately small, the live geocoder covers the rest.
const METRO_ZIP_COUNTIES: &[(&str, &str)] = &[
    ("02108", "25025"), // Boston, Suffolk
    ("10001", "36061"), // Manhattan, New York
    ("19103", "42101"), // Philadelphia
    ("20001", "11001"), // Washington DC
    ("30303", "13121"), // Atlanta, Fulton
    ("33101", "12086"), // Miami, Miami-Dade
    ("48201", "26163"), // Detroit, Wayne
    ("55401", "27053"), // Minneapolis, Hennepin
    ("60601", "17031"), // Chicago, Cook
    ("75201", "48113"), // Dallas
    ("77001", "48201"), // Houston, Harris
    ("80202", "08031"), // Denver
    ("85001", "04013"), // Phoenix, Maricopa
    ("90001", "06037"), // Los Angeles
    ("94102", "06075"), // San Francisco
    ("98101", "53033"), // Seattle, King
];

pub(crate) fn metro_fallback_table() -> HashMap<String, CountyId> {
    METRO_ZIP_COUNTIES
        .iter()
        .map(|(zip, fips)| {
            (
                (*zip).to_owned(),
                CountyId::parse(fips).expect("metro table entries are valid"),
            )
        })
        .collect()
}

/// Coarse state inference from the first two ZIP digits. Several prefixes
/// span state lines; the dominant state wins, which is acceptable for a
/// last-resort tier that only feeds the per-state default below.
pub(crate) fn state_for_zip_prefix(prefix: &str) -> Option<&'static str> {
    let state = match prefix {
        "01" | "02" => "MA",
        "03" => "NH",
        "04" => "ME",
        "05" => "VT",
        "06" => "CT",
        "07" | "08" => "NJ",
        "10" | "11" | "12" | "13" | "14" => "NY",
        "15" | "16" | "17" | "18" | "19" => "PA",
        "20" => "DC",
        "21" => "MD",
        "22" | "23" | "24" => "VA",
        "25" | "26" => "WV",
        "27" | "28" => "NC",
        "29" => "SC",
        "30" | "31" => "GA",
        "32" | "33" | "34" => "FL",
        "35" | "36" => "AL",
        "37" | "38" => "TN",
        "39" => "MS",
        "40" | "41" | "42" => "KY",
        "43" | "44" | "45" => "OH",
        "46" | "47" => "IN",
        "48" | "49" => "MI",
        "50" | "51" | "52" => "IA",
        "53" | "54" => "WI",
        "55" | "56" => "MN",
        "57" => "SD",
        "58" => "ND",
        "59" => "MT",
        "60" | "61" | "62" => "IL",
        "63" | "64" | "65" => "MO",
        "66" | "67" => "KS",
        "68" | "69" => "NE",
        "70" | "71" => "LA",
        "72" => "AR",
        "73" | "74" => "OK",
        "75" | "76" | "77" | "78" | "79" => "TX",
        "80" | "81" => "CO",
        "82" | "83" => "WY",
        "84" => "UT",
        "85" | "86" => "AZ",
        "87" | "88" => "NM",
        "89" => "NV",
        "90" | "91" | "92" | "93" | "94" | "95" => "CA",
        "96" => "HI",
        "97" => "OR",
        "98" | "99" => "WA",
        _ => return None,
    };
    Some(state)
}

/// Each state's most populous county, the coarse tier-4 answer.
pub(crate) fn default_county_for_state(state: &str) -> Option<&'static str> {
    let fips = match state {
        "AL" => "01073", // Jefferson
        "AK" => "02020", // Anchorage
        "AZ" => "04013", // Maricopa
        "AR" => "05119", // Pulaski
        "CA" => "06037", // Los Angeles
        "CO" => "08031", // Denver
        "CT" => "09001", // Fairfield
        "DE" => "10003", // New Castle
        "DC" => "11001",
        "FL" => "12086", // Miami-Dade
        "GA" => "13121", // Fulton
        "HI" => "15003", // Honolulu
        "ID" => "16001", // Ada
        "IL" => "17031", // Cook
        "IN" => "18097", // Marion
        "IA" => "19153", // Polk
        "KS" => "20091", // Johnson
        "KY" => "21111", // Jefferson
        "LA" => "22033", // East Baton Rouge
        "ME" => "23005", // Cumberland
        "MD" => "24031", // Montgomery
        "MA" => "25017", // Middlesex
        "MI" => "26163", // Wayne
        "MN" => "27053", // Hennepin
        "MS" => "28049", // Hinds
        "MO" => "29189", // St. Louis
        "MT" => "30111", // Yellowstone
        "NE" => "31055", // Douglas
        "NV" => "32003", // Clark
        "NH" => "33011", // Hillsborough
        "NJ" => "34003", // Bergen
        "NM" => "35001", // Bernalillo
        "NY" => "36047", // Kings
        "NC" => "37119", // Mecklenburg
        "ND" => "38017", // Cass
        "OH" => "39049", // Franklin
        "OK" => "40109", // Oklahoma
        "OR" => "41051", // Multnomah
        "PA" => "42101", // Philadelphia
        "RI" => "44007", // Providence
        "SC" => "45045", // Greenville
        "SD" => "46099", // Minnehaha
        "TN" => "47157", // Shelby
        "TX" => "48201", // Harris
        "UT" => "49035", // Salt Lake
        "VT" => "50007", // Chittenden
        "VA" => "51059", // Fairfax
        "WA" => "53033", // King
        "WV" => "54039", // Kanawha
        "WI" => "55079", // Milwaukee
        "WY" => "56025", // Natrona
        _ => return None,
    };
    Some(fips)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metro_table_parses_cleanly() {
        let table = metro_fallback_table();
        assert_eq!(table.len(), METRO_ZIP_COUNTIES.len());
        assert_eq!(table.get("90001").map(CountyId::as_str), Some("06037"));
    }

    #[test]
    fn every_prefix_state_has_a_default_county() {
        for prefix in 0..100 {
            let key = format!("{prefix:02}");
            if let Some(state) = state_for_zip_prefix(&key) {
                assert!(
                    default_county_for_state(state).is_some(),
                    "prefix {key} maps to state {state} with no default county"
                );
            }
        }
    }

    #[test]
    fn default_counties_are_valid_fips() {
        assert!(CountyId::parse(default_county_for_state(DEFAULT_STATE).expect("CA")).is_ok());
        assert_eq!(default_county_for_state("NY"), Some("36047"));
        assert_eq!(default_county_for_state("XX"), None);
    }
}
