use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A crowd-sourced barrier report. Permanent record; only the (out of scope)
/// verification workflow may touch it after creation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Barrier {
    pub id: Uuid,
    pub user_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-form tag: pothole, missing_ramp, stairs, construction, curb, ...
    pub barrier_type: String,
    /// "low" | "medium" | "high"; other values are tolerated and scored like
    /// "medium".
    pub severity: String,
    pub description: String,
    pub photo_base64: Option<String>,
    /// Label from the external classifier, only set when a photo was attached
    /// and the classifier answered.
    pub ai_classification: Option<String>,
    pub verified: bool,
    pub created_at: NaiveDateTime,
}
