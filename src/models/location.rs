use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::report::LocationReport;
use crate::scoring::{self, LocationFeatures};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    /// Derived at creation from the accessibility flags; a client-supplied
    /// value is never trusted.
    pub sanchara_score: f64,
    pub has_ramp: bool,
    pub has_elevator: bool,
    pub has_stairs: bool,
    pub surface_type: String,  // "smooth" | "rough"
    pub incline_level: String, // "low" | "moderate" | "high"
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Location {
    /// Builds a location row from a report, recomputing the sanchara score
    /// from the flags. Any score in the report is discarded.
    pub fn from_report(report: LocationReport, latitude: f64, longitude: f64) -> Self {
        let has_ramp = report.has_ramp.unwrap_or(false);
        let has_elevator = report.has_elevator.unwrap_or(false);
        let has_stairs = report.has_stairs.unwrap_or(true);
        let surface_type = report.surface_type.unwrap_or_else(|| "rough".to_string());
        let incline_level = report
            .incline_level
            .unwrap_or_else(|| "moderate".to_string());

        let sanchara_score = scoring::location_score(&LocationFeatures {
            has_ramp,
            has_elevator,
            has_stairs,
            surface_type: &surface_type,
            incline_level: &incline_level,
        });

        Self {
            id: Uuid::new_v4(),
            name: report.name,
            latitude,
            longitude,
            address: report.address,
            sanchara_score,
            has_ramp,
            has_elevator,
            has_stairs,
            surface_type,
            incline_level,
            description: report.description,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_supplied_score_is_overridden() {
        let report = LocationReport {
            name: "Central Library".to_string(),
            latitude: Some(12.97),
            longitude: Some(77.59),
            address: "MG Road".to_string(),
            sanchara_score: Some(9.9),
            has_ramp: Some(false),
            has_elevator: Some(false),
            has_stairs: Some(true),
            surface_type: Some("rough".to_string()),
            incline_level: Some("high".to_string()),
            description: None,
        };
        let location = Location::from_report(report, 12.97, 77.59);
        // No bonuses apply, so the derived score is the base, not the
        // client's 9.9.
        assert_eq!(location.sanchara_score, 5.0);
    }

    #[test]
    fn defaults_match_an_inaccessible_location() {
        let report = LocationReport {
            name: "Kiosk".to_string(),
            latitude: Some(0.0),
            longitude: Some(0.0),
            address: "".to_string(),
            sanchara_score: None,
            has_ramp: None,
            has_elevator: None,
            has_stairs: None,
            surface_type: None,
            incline_level: None,
            description: None,
        };
        let location = Location::from_report(report, 0.0, 0.0);
        assert!(!location.has_ramp);
        assert!(location.has_stairs);
        assert_eq!(location.surface_type, "rough");
        assert_eq!(location.incline_level, "moderate");
        assert_eq!(location.sanchara_score, 5.0);
    }
}
