use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// The accessibility need a route is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Blind,
    Deaf,
    Wheelchair,
}

impl TravelMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "blind" => Some(TravelMode::Blind),
            "deaf" => Some(TravelMode::Deaf),
            "wheelchair" => Some(TravelMode::Wheelchair),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Blind => "blind",
            TravelMode::Deaf => "deaf",
            TravelMode::Wheelchair => "wheelchair",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A computed route. Immutable once persisted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub mode: String,
    /// Meters, planar approximation.
    pub distance: f64,
    /// Seconds at average walking speed.
    pub duration: f64,
    pub accessibility_score: f64,
    /// Ordered path: first = start, last = end.
    pub waypoints: Json<Vec<Waypoint>>,
    /// Up to five barrier ids that contributed to the score.
    pub barriers: Vec<Uuid>,
    pub created_at: NaiveDateTime,
}
