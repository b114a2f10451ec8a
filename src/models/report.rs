use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Inbound command envelope from the ingest topic. Gateways publish one JSON
/// object per command, tagged by `kind`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Envelope {
    Location(LocationReport),
    BarrierReport(BarrierReport),
    Alert(AlertReport),
    RouteRequest(RouteRequest),
}

#[derive(Debug, Deserialize)]
pub struct LocationReport {
    pub name: String,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
    pub address: String,
    /// Accepted for wire compatibility and always discarded; the score is
    /// recomputed from the flags.
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub sanchara_score: Option<f64>,
    pub has_ramp: Option<bool>,
    pub has_elevator: Option<bool>,
    pub has_stairs: Option<bool>,
    pub surface_type: Option<String>,
    pub incline_level: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BarrierReport {
    pub user_id: Uuid,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
    pub barrier_type: String,
    pub severity: String,
    pub description: String,
    pub photo_base64: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlertReport {
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
    pub alert_type: String,
    pub message: String,
    pub severity: String,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub user_id: Uuid,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub start_lat: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub start_lng: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub end_lat: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub end_lng: Option<f64>,
    pub mode: String,
}

// Mobile clients serialize coordinates inconsistently, sometimes as strings.
// Accept both forms; an empty string counts as absent.
fn parse_f64_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        String(String),
        Float(f64),
    }

    let v: Option<StringOrFloat> = Option::deserialize(deserializer)?;
    match v {
        Some(StringOrFloat::Float(f)) => Ok(Some(f)),
        Some(StringOrFloat::String(s)) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                s.parse::<f64>().map(Some).map_err(serde::de::Error::custom)
            }
        }
        None => Ok(None),
    }
}
