//! Accessibility scoring.
//!
//! Pure functions: no I/O, no failure modes. Scores live on a 1.0..=10.0 scale.

use crate::models::route::TravelMode;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

const LOCATION_BASE_SCORE: f64 = 5.0;
const ROUTE_BASE_SCORE: f64 = 8.0;

/// Accessibility attributes of a location, borrowed from whatever record holds
/// them.
pub struct LocationFeatures<'a> {
    pub has_ramp: bool,
    pub has_elevator: bool,
    pub has_stairs: bool,
    pub surface_type: &'a str,
    pub incline_level: &'a str,
}

/// Sanchara score for a single location. Starts at 5.0 and adds a bonus per
/// accessible feature, clamped to the score scale.
pub fn location_score(features: &LocationFeatures<'_>) -> f64 {
    let mut score = LOCATION_BASE_SCORE;
    if features.has_ramp {
        score += 2.0;
    }
    if features.has_elevator {
        score += 1.5;
    }
    if !features.has_stairs {
        score += 1.0;
    }
    if features.surface_type == "smooth" {
        score += 1.5;
    }
    if features.incline_level == "low" {
        score += 1.0;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Maps a barrier severity to a score penalty for a given travel mode.
///
/// Extension point for mode-weighted penalties (e.g. stairs hurting wheelchair
/// routes more than blind routes). The default model is mode-independent.
pub trait PenaltyModel: Send + Sync {
    fn penalty(&self, mode: TravelMode, severity: &str) -> f64;
}

/// The default severity table: identical for every travel mode, with
/// unrecognized severities penalized like "medium".
pub struct UniformPenalties;

impl PenaltyModel for UniformPenalties {
    fn penalty(&self, _mode: TravelMode, severity: &str) -> f64 {
        match severity {
            "low" => 0.5,
            "medium" => 1.0,
            "high" => 2.0,
            _ => 1.0,
        }
    }
}

/// Route score: starts at 8.0 and subtracts a penalty per barrier along the
/// route, clamped to the score scale.
pub fn route_score<'a, I>(mode: TravelMode, severities: I, model: &dyn PenaltyModel) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut score = ROUTE_BASE_SCORE;
    for severity in severities {
        score -= model.penalty(mode, severity);
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}
