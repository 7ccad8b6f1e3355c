//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{CtaFocus, TransitPreferences};
use crate::rating::{RankedAddress, RatingFailure, RatingReport, RatingRequest, ResolvedPoi};

/// Request to rank candidate addresses.
#[derive(Debug, Deserialize)]
pub struct RankRequest {
    /// Candidate addresses (2 to 5)
    pub addresses: Vec<String>,

    /// Points of interest, most important first
    #[serde(default)]
    pub pois: Vec<String>,

    /// Preference level per mode; missing modes are "none"
    #[serde(default)]
    pub transit_prefs: TransitPreferences,

    #[serde(default)]
    pub cta_focus: CtaFocus,

    #[serde(default)]
    pub south_side: bool,
}

impl RankRequest {
    pub fn into_rating_request(self) -> RatingRequest {
        RatingRequest::new(self.addresses, self.transit_prefs)
            .with_pois(self.pois)
            .with_cta_focus(self.cta_focus)
            .with_south_side(self.south_side)
    }
}

/// Outcome for one requested address.
#[derive(Debug, Serialize)]
pub struct AddressResult {
    pub address: String,

    /// Score in seconds-equivalent; lower is better
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// 1-indexed position among rated addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,

    /// Why the address could not be rated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for a ranking request.
#[derive(Debug, Serialize)]
pub struct RankResponse {
    /// One entry per requested address, in request order
    pub results: Vec<AddressResult>,

    /// Rated addresses, best first
    pub ranked: Vec<RankedAddress>,

    /// Points of interest that were used
    pub pois: Vec<ResolvedPoi>,

    /// Points of interest that could not be found
    pub poi_errors: Vec<RatingFailure>,
}

impl RankResponse {
    /// Lay out a report in the order the addresses were requested.
    pub fn from_report(addresses: &[String], report: RatingReport) -> Self {
        let results = addresses
            .iter()
            .map(|address| {
                let ranked = report.ranked.iter().find(|r| &r.address == address);
                let error = report
                    .failures
                    .iter()
                    .find(|f| &f.query == address)
                    .map(|f| f.error.clone());
                AddressResult {
                    address: address.clone(),
                    score: ranked.map(|r| r.score),
                    rank: ranked.map(|r| r.rank),
                    error,
                }
            })
            .collect();

        Self {
            results,
            ranked: report.ranked,
            pois: report.pois,
            poi_errors: report.poi_failures,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PreferenceLevel;

    #[test]
    fn parse_minimal_request() {
        let json = r#"{
            "addresses": ["5500 S Shore Dr", "5801 S Ellis Ave"],
            "transit_prefs": {"cta": "high", "divvy": "med"}
        }"#;

        let req: RankRequest = serde_json::from_str(json).unwrap();
        assert!(req.pois.is_empty());
        assert_eq!(req.cta_focus, CtaFocus::Neither);
        assert!(!req.south_side);

        let rating = req.into_rating_request();
        assert_eq!(rating.addresses.len(), 2);
        assert_eq!(rating.transit_prefs.cta, PreferenceLevel::High);
        assert_eq!(rating.transit_prefs.bicycling, PreferenceLevel::Medium);
        assert_eq!(rating.transit_prefs.walking, PreferenceLevel::None);
    }

    #[test]
    fn parse_full_request() {
        let json = r#"{
            "addresses": ["a", "b", "c"],
            "pois": ["Regenstein Library"],
            "transit_prefs": {"walking": "low", "driving": "none", "cta": "high",
                              "bicycling": "medium", "shuttles": "high"},
            "cta_focus": "downtown_focus",
            "south_side": true
        }"#;

        let rating = serde_json::from_str::<RankRequest>(json)
            .unwrap()
            .into_rating_request();
        assert_eq!(rating.pois, vec!["Regenstein Library".to_string()]);
        assert_eq!(rating.cta_focus, CtaFocus::Downtown);
        assert!(rating.south_side);
        assert_eq!(rating.transit_prefs.shuttles, PreferenceLevel::High);
    }

    #[test]
    fn response_marks_failures() {
        let report = RatingReport {
            scores: Vec::new(),
            ranked: vec![RankedAddress {
                rank: 1,
                address: "a".to_string(),
                score: 156.0,
            }],
            failures: vec![RatingFailure {
                query: "b".to_string(),
                error: "not found: b".to_string(),
            }],
            pois: Vec::new(),
            poi_failures: Vec::new(),
        };

        let response = RankResponse::from_report(&["b".to_string(), "a".to_string()], report);

        assert_eq!(response.results[0].address, "b");
        assert_eq!(response.results[0].error.as_deref(), Some("not found: b"));
        assert_eq!(response.results[0].rank, None);
        assert_eq!(response.results[1].rank, Some(1));
        assert_eq!(response.results[1].score, Some(156.0));

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["results"][1].get("error").is_none());
    }
}
