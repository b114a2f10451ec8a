use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_ALERT_RADIUS_M: f64 = 100.0;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Alert {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    /// pothole, elevator_out, construction, hazard, ...
    pub alert_type: String,
    pub message: String,
    pub severity: String,
    /// Meters around the alert position it applies to.
    pub radius: f64,
    pub created_at: NaiveDateTime,
    pub expires_at: Option<NaiveDateTime>,
}
