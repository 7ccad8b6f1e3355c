//! Request orchestration: validate, fetch, rate, rank.
//!
//! Each address is an independent failure domain. Addresses and POIs are
//! fetched concurrently and joined before ranking.

use futures::future::{join_all, try_join_all};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    CtaFocus, LatLon, Mode, RegionFilter, StopKind, TransitPreferences, TravelMode,
    TravelTimeEntry, TravelTimeMap,
};
use crate::maps::ProviderError;

use super::classify::RouteClassifier;
use super::config::RatingConfig;
use super::error::RatingError;
use super::location::{ModeRatings, location_rating};
use super::modes::{ModeRater, ZoneWeights};
use super::nearest::two_nearest;
use super::poi::{
    active_poi_modes, bike_share_time, combine_poi_ratings, direct_travel_mode, poi_rating,
};
use super::provider::{PlaceResult, RatingProvider};
use super::rank::{AddressRating, RankedAddress, address_score, rank_addresses};

/// A request to rate and rank candidate addresses.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRequest {
    /// Candidate addresses, free text.
    pub addresses: Vec<String>,

    /// Points of interest, most important first.
    pub pois: Vec<String>,

    /// Preference level per transit mode.
    pub transit_prefs: TransitPreferences,

    /// Which CTA destinations matter most.
    pub cta_focus: CtaFocus,

    /// Whether South Side destinations matter.
    pub south_side: bool,
}

impl RatingRequest {
    /// Create a request with no POIs, no CTA focus and no South Side interest.
    pub fn new(addresses: Vec<String>, transit_prefs: TransitPreferences) -> Self {
        Self {
            addresses,
            pois: Vec::new(),
            transit_prefs,
            cta_focus: CtaFocus::Neither,
            south_side: false,
        }
    }

    pub fn with_pois(mut self, pois: Vec<String>) -> Self {
        self.pois = pois;
        self
    }

    pub fn with_cta_focus(mut self, focus: CtaFocus) -> Self {
        self.cta_focus = focus;
        self
    }

    pub fn with_south_side(mut self, south_side: bool) -> Self {
        self.south_side = south_side;
        self
    }

    /// Stop kinds rated for location proximity.
    fn location_kinds(&self) -> impl Iterator<Item = StopKind> + '_ {
        StopKind::ALL
            .into_iter()
            .filter(|kind| !self.transit_prefs.level(kind.mode()).is_none())
    }

    /// Check the request can be rated at all. Runs before any provider call.
    pub fn validate(&self, config: &RatingConfig) -> Result<(), RatingError> {
        let count = self.addresses.len();
        if count < config.min_addresses {
            return Err(RatingError::Configuration(format!(
                "at least {} addresses are needed for a ranking, got {count}",
                config.min_addresses
            )));
        }
        if count > config.max_addresses {
            return Err(RatingError::Configuration(format!(
                "at most {} addresses can be ranked, got {count}",
                config.max_addresses
            )));
        }
        if self.pois.len() > config.max_pois {
            return Err(RatingError::Configuration(format!(
                "at most {} points of interest are allowed, got {}",
                config.max_pois,
                self.pois.len()
            )));
        }

        for (idx, address) in self.addresses.iter().enumerate() {
            if address.trim().is_empty() {
                return Err(RatingError::Configuration(format!(
                    "address {} is empty",
                    idx + 1
                )));
            }
            if self.addresses[..idx].contains(address) {
                return Err(RatingError::Configuration(format!(
                    "address {address:?} is listed twice"
                )));
            }
        }
        if self.pois.iter().any(|poi| poi.trim().is_empty()) {
            return Err(RatingError::Configuration(
                "points of interest must not be empty".to_string(),
            ));
        }

        let rates_location = self.location_kinds().next().is_some();
        let rates_pois = active_poi_modes(&self.transit_prefs).next().is_some();

        if self.pois.is_empty() && !rates_location {
            return Err(RatingError::Configuration(
                "no CTA, bicycling or shuttle preference and no points of interest: nothing to rate"
                    .to_string(),
            ));
        }
        if !self.pois.is_empty() && !rates_pois {
            return Err(RatingError::Configuration(
                "points of interest need a walking, driving, CTA or bicycling preference"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

/// A POI query resolved to a place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPoi {
    /// 0-indexed position in the request's POI list.
    pub rank: usize,
    pub query: String,
    pub place: PlaceResult,
}

/// An address or POI that could not be rated, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingFailure {
    pub query: String,
    pub error: String,
}

/// Outcome of a rating request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingReport {
    /// Successful scores, in request order.
    pub scores: Vec<AddressRating>,

    /// Successful addresses, best first.
    pub ranked: Vec<RankedAddress>,

    /// Addresses that could not be rated.
    pub failures: Vec<RatingFailure>,

    /// POIs that were used.
    pub pois: Vec<ResolvedPoi>,

    /// POIs that could not be resolved; they count for no address.
    pub poi_failures: Vec<RatingFailure>,
}

impl RatingReport {
    /// Score of a successfully rated address.
    pub fn score(&self, address: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|rating| rating.address == address)
            .map(|rating| rating.score)
    }
}

/// Rates candidate addresses against a provider.
pub struct RatingEngine<P> {
    provider: P,
    classifier: RouteClassifier,
    config: RatingConfig,
}

impl<P: RatingProvider> RatingEngine<P> {
    /// Create an engine with the standard CTA route table.
    pub fn new(provider: P, config: RatingConfig) -> Self {
        Self {
            provider,
            classifier: RouteClassifier::default(),
            config,
        }
    }

    /// Replace the route classification table.
    pub fn with_classifier(mut self, classifier: RouteClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Rate every address in the request and rank them.
    ///
    /// Per-address failures are reported in the result; fatal errors
    /// (configuration, lookup tables out of date) abort the request.
    pub async fn rate(&self, request: &RatingRequest) -> Result<RatingReport, RatingError> {
        request.validate(&self.config)?;

        info!(
            addresses = request.addresses.len(),
            pois = request.pois.len(),
            "rating request"
        );

        let (pois, poi_failures) = self.resolve_pois(&request.pois).await;

        let outcomes = join_all(
            request
                .addresses
                .iter()
                .map(|address| self.rate_address(address, request, &pois)),
        )
        .await;

        let mut scores = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();

        for (address, outcome) in request.addresses.iter().zip(outcomes) {
            match outcome {
                Ok(score) => scores.push(AddressRating {
                    address: address.clone(),
                    score,
                }),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(address = %address, error = %e, "address could not be rated");
                    failures.push(RatingFailure {
                        query: address.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let ranked = rank_addresses(&scores);

        Ok(RatingReport {
            scores,
            ranked,
            failures,
            pois,
            poi_failures,
        })
    }

    /// Resolve POI queries concurrently, near the service area.
    async fn resolve_pois(&self, queries: &[String]) -> (Vec<ResolvedPoi>, Vec<RatingFailure>) {
        let near = self.config.area.center();

        let results = join_all(queries.iter().enumerate().map(|(rank, query)| async move {
            (rank, query, self.provider.resolve(query, near).await)
        }))
        .await;

        let mut resolved = Vec::with_capacity(results.len());
        let mut failures = Vec::new();

        for (rank, query, result) in results {
            match result {
                Ok(place) => resolved.push(ResolvedPoi {
                    rank,
                    query: query.clone(),
                    place,
                }),
                Err(e) => {
                    warn!(poi = %query, error = %e, "point of interest could not be resolved");
                    failures.push(RatingFailure {
                        query: query.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        (resolved, failures)
    }

    /// Score one address: location proximity combined with POI proximity.
    pub async fn rate_address(
        &self,
        address: &str,
        request: &RatingRequest,
        pois: &[ResolvedPoi],
    ) -> Result<f64, RatingError> {
        let origin = self.provider.locate(address).await?;
        if !self.config.area.contains(&origin) {
            return Err(RatingError::AddressOutOfRange {
                address: address.to_string(),
            });
        }

        let location = self.location_score(origin, request).await?;
        let poi = if pois.is_empty() {
            None
        } else {
            self.poi_score(origin, &request.transit_prefs, pois).await?
        };

        debug!(address, ?location, ?poi, "address rated");

        address_score(location, poi).ok_or_else(|| RatingError::Unrateable {
            address: address.to_string(),
        })
    }

    /// Proximity to CTA, Divvy and shuttle stops, weighted by preference.
    async fn location_score(
        &self,
        origin: LatLon,
        request: &RatingRequest,
    ) -> Result<Option<f64>, RatingError> {
        let weights = ZoneWeights::for_preferences(request.cta_focus, request.south_side);
        let raters: Vec<ModeRater<'_>> = request
            .location_kinds()
            .map(|kind| match kind {
                StopKind::Cta => ModeRater::Cta {
                    classifier: &self.classifier,
                    weights,
                },
                StopKind::Divvy => ModeRater::Divvy,
                StopKind::Shuttles => ModeRater::Shuttles,
            })
            .collect();

        if raters.is_empty() {
            return Ok(None);
        }

        let times = try_join_all(
            raters
                .iter()
                .map(|rater| self.provider.nearby(rater.kind(), origin)),
        )
        .await?;

        let mut ratings = ModeRatings::default();
        for (rater, times) in raters.iter().zip(&times) {
            let rating = rater.rate(times)?;
            debug!(kind = %rater.kind(), stops = times.len(), ?rating, "mode rated");
            ratings.set(rater.kind(), rating);
        }

        if ratings.is_empty() {
            return Ok(None);
        }
        location_rating(&ratings, &request.transit_prefs).map(Some)
    }

    /// Proximity to the requested POIs over every preferred mode.
    async fn poi_score(
        &self,
        origin: LatLon,
        prefs: &TransitPreferences,
        pois: &[ResolvedPoi],
    ) -> Result<Option<f64>, RatingError> {
        let destinations: Vec<LatLon> = pois.iter().map(|poi| poi.place.location).collect();
        let destinations = destinations.as_slice();
        let modes: Vec<Mode> = active_poi_modes(prefs).collect();

        // One batched call per directly routed mode
        let direct = try_join_all(modes.iter().filter_map(|mode| {
            direct_travel_mode(*mode).map(|travel_mode| async move {
                let times = self
                    .provider
                    .distance(origin, destinations, travel_mode)
                    .await?;
                check_batch_len(&times, destinations.len())?;
                Ok::<_, ProviderError>((*mode, times))
            })
        }))
        .await?;

        let bike_share = if modes.contains(&Mode::Bicycling) {
            self.bike_share_times(origin, pois).await?
        } else {
            vec![None; pois.len()]
        };

        let mut rated = Vec::with_capacity(pois.len());
        for (idx, poi) in pois.iter().enumerate() {
            let mut times: Vec<(Mode, f64)> = direct
                .iter()
                .map(|(mode, times)| (*mode, times[idx]))
                .collect();
            if let Some(time) = bike_share[idx] {
                times.push((Mode::Bicycling, time));
            }

            match poi_rating(&times, prefs)? {
                Some(rating) => rated.push((poi.rank, rating)),
                None => debug!(poi = %poi.query, "no mode reaches point of interest"),
            }
        }

        Ok(combine_poi_ratings(&rated))
    }

    /// Door-to-door bike-share time to each POI.
    ///
    /// Walk to the Divvy station nearest the address, ride to the station
    /// nearest the POI, walk the rest. `None` where either end has no
    /// station or both ends share one.
    async fn bike_share_times(
        &self,
        origin: LatLon,
        pois: &[ResolvedPoi],
    ) -> Result<Vec<Option<f64>>, ProviderError> {
        let home_stations = self.provider.nearby(StopKind::Divvy, origin).await?;
        let Some(start) = nearest_station(&home_stations) else {
            return Ok(vec![None; pois.len()]);
        };
        let Some(start_coords) = start.coordinates else {
            return Ok(vec![None; pois.len()]);
        };

        let far_stations = try_join_all(
            pois.iter()
                .map(|poi| self.provider.stations_near(poi.place.location)),
        )
        .await?;

        // (poi index, far-end station) for every POI that needs a ride
        let legs: Vec<(usize, &TravelTimeEntry, LatLon)> = far_stations
            .iter()
            .enumerate()
            .filter_map(|(idx, stations)| {
                let end = nearest_station(stations)?;
                if end.target_id == start.target_id {
                    return None;
                }
                Some((idx, end, end.coordinates?))
            })
            .collect();

        let mut times = vec![None; pois.len()];
        if legs.is_empty() {
            return Ok(times);
        }

        let ride_targets: Vec<LatLon> = legs.iter().map(|(_, _, coords)| *coords).collect();
        let rides = self
            .provider
            .distance(start_coords, &ride_targets, TravelMode::Bicycling)
            .await?;
        check_batch_len(&rides, ride_targets.len())?;

        for ((idx, end, _), ride) in legs.iter().zip(rides) {
            times[*idx] = Some(bike_share_time(start.time_seconds, ride, end.time_seconds));
        }

        Ok(times)
    }
}

/// The station with the shortest walk that has known coordinates.
fn nearest_station(stations: &TravelTimeMap) -> Option<&TravelTimeEntry> {
    two_nearest(
        stations
            .values()
            .filter(|entry| entry.coordinates.is_some())
            .map(|entry| (entry, entry.time_seconds)),
    )
    .first()
    .map(|nearest| nearest.id)
}

fn check_batch_len(times: &[f64], expected: usize) -> Result<(), ProviderError> {
    if times.len() != expected {
        return Err(ProviderError::UnexpectedResponse(format!(
            "expected {expected} travel times, got {}",
            times.len()
        )));
    }
    Ok(())
}
