//! Accessibility-aware route planning.
//!
//! Routing is a straight-line waypoint approximation, not graph search: the
//! path is start -> midpoint -> end, distances are planar degrees scaled to
//! meters, and the score comes from barriers near that line.

use std::sync::Arc;

use chrono::Utc;
use sqlx::types::Json;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::geo;
use crate::models::report::RouteRequest;
use crate::models::route::{Route, TravelMode, Waypoint};
use crate::scoring::{self, PenaltyModel, UniformPenalties};
use crate::store::{BarrierStore, RouteStore};

/// Average pedestrian speed used for duration estimates, in m/s.
pub const WALKING_SPEED_MPS: f64 = 1.4;

/// At most this many barrier ids are attached to a route.
pub const MAX_ROUTE_BARRIERS: usize = 5;

/// Outer bound on the barrier fetch per route request.
const BARRIER_FETCH_LIMIT: i64 = 50;

pub struct RouteEngine {
    barriers: Arc<dyn BarrierStore>,
    routes: Arc<dyn RouteStore>,
    penalties: Box<dyn PenaltyModel>,
    /// Half-width of the corridor around the path, in meters. Barriers
    /// outside it do not affect the score.
    corridor_m: f64,
}

impl RouteEngine {
    pub fn new(barriers: Arc<dyn BarrierStore>, routes: Arc<dyn RouteStore>, corridor_m: f64) -> Self {
        Self {
            barriers,
            routes,
            penalties: Box::new(UniformPenalties),
            corridor_m,
        }
    }

    /// Swaps the severity penalty model, e.g. for mode-weighted scoring.
    pub fn with_penalty_model(mut self, penalties: Box<dyn PenaltyModel>) -> Self {
        self.penalties = penalties;
        self
    }

    /// Plans, scores and persists a route. Fails with `InvalidRequest` before
    /// any state change when coordinates are absent or the mode is not
    /// recognized; a datastore failure propagates as `Unavailable`.
    pub async fn plan_route(&self, request: &RouteRequest) -> ServiceResult<Route> {
        let mode = TravelMode::parse(&request.mode).ok_or_else(|| {
            ServiceError::InvalidRequest(format!(
                "mode must be blind, deaf or wheelchair, got '{}'",
                request.mode
            ))
        })?;

        let (start_lat, start_lng) = match (request.start_lat, request.start_lng) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                return Err(ServiceError::InvalidRequest(
                    "missing start coordinates".to_string(),
                ))
            }
        };
        let (end_lat, end_lng) = match (request.end_lat, request.end_lng) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => {
                return Err(ServiceError::InvalidRequest(
                    "missing end coordinates".to_string(),
                ))
            }
        };

        let distance = geo::planar_distance_m(start_lat, start_lng, end_lat, end_lng);
        let duration = distance / WALKING_SPEED_MPS;

        let (mid_lat, mid_lng) = geo::midpoint(start_lat, start_lng, end_lat, end_lng);
        let waypoints = vec![
            Waypoint {
                latitude: start_lat,
                longitude: start_lng,
            },
            Waypoint {
                latitude: mid_lat,
                longitude: mid_lng,
            },
            Waypoint {
                latitude: end_lat,
                longitude: end_lng,
            },
        ];

        // Fetch around the midpoint with a radius covering the whole path,
        // then keep only barriers inside the corridor.
        let fetch_radius = distance / 2.0 + self.corridor_m;
        let candidates = self
            .barriers
            .query_near(mid_lat, mid_lng, fetch_radius, BARRIER_FETCH_LIMIT)
            .await?;
        let on_path: Vec<_> = candidates
            .into_iter()
            .filter(|b| {
                geo::point_segment_distance_m(
                    b.latitude,
                    b.longitude,
                    start_lat,
                    start_lng,
                    end_lat,
                    end_lng,
                ) <= self.corridor_m
            })
            .collect();

        let accessibility_score = scoring::route_score(
            mode,
            on_path.iter().map(|b| b.severity.as_str()),
            self.penalties.as_ref(),
        );

        debug!(
            "Planned {} route over {:.0} m with {} barriers in corridor, score {:.1}",
            mode.as_str(),
            distance,
            on_path.len(),
            accessibility_score
        );

        let route = Route {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            start_lat,
            start_lng,
            end_lat,
            end_lng,
            mode: mode.as_str().to_string(),
            distance,
            duration,
            accessibility_score,
            waypoints: Json(waypoints),
            barriers: on_path
                .iter()
                .take(MAX_ROUTE_BARRIERS)
                .map(|b| b.id)
                .collect(),
            created_at: Utc::now().naive_utc(),
        };

        self.routes.create(route).await
    }
}
