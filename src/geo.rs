//! Planar coordinate helpers.
//!
//! Distances use a flat-earth approximation: coordinate deltas in WGS84 degrees
//! scaled by ~111 km per degree. Good enough for the city-scale spans this
//! service handles; not geodesically exact.

pub const METERS_PER_DEGREE: f64 = 111_000.0;

pub fn planar_distance_m(a_lat: f64, a_lng: f64, b_lat: f64, b_lng: f64) -> f64 {
    let dlat = b_lat - a_lat;
    let dlng = b_lng - a_lng;
    (dlat * dlat + dlng * dlng).sqrt() * METERS_PER_DEGREE
}

pub fn midpoint(a_lat: f64, a_lng: f64, b_lat: f64, b_lng: f64) -> (f64, f64) {
    ((a_lat + b_lat) / 2.0, (a_lng + b_lng) / 2.0)
}

/// Distance in meters from a point to the segment a->b, computed in degree
/// space. Degenerate segments collapse to point distance.
pub fn point_segment_distance_m(
    p_lat: f64,
    p_lng: f64,
    a_lat: f64,
    a_lng: f64,
    b_lat: f64,
    b_lng: f64,
) -> f64 {
    let seg_lat = b_lat - a_lat;
    let seg_lng = b_lng - a_lng;
    let len_sq = seg_lat * seg_lat + seg_lng * seg_lng;
    if len_sq == 0.0 {
        return planar_distance_m(p_lat, p_lng, a_lat, a_lng);
    }
    let t = ((p_lat - a_lat) * seg_lat + (p_lng - a_lng) * seg_lng) / len_sq;
    let t = t.clamp(0.0, 1.0);
    planar_distance_m(p_lat, p_lng, a_lat + t * seg_lat, a_lng + t * seg_lng)
}
