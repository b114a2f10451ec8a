// Proximity queries prefilter with a degree bounding box ($3 = radius in
// degrees); callers refine the candidates with an exact planar check.

pub const INSERT_LOCATION: &str = r#"
INSERT INTO locations (
    id, name, latitude, longitude, address, sanchara_score,
    has_ramp, has_elevator, has_stairs, surface_type, incline_level,
    description, created_at
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13);
"#;

pub const SELECT_LOCATIONS_NEAR: &str = r#"
SELECT * FROM locations
WHERE latitude BETWEEN $1 - $3 AND $1 + $3
  AND longitude BETWEEN $2 - $3 AND $2 + $3
  AND ($4::float8 IS NULL OR sanchara_score >= $4)
ORDER BY created_at DESC
LIMIT $5;
"#;

pub const INSERT_BARRIER: &str = r#"
INSERT INTO barriers (
    id, user_id, latitude, longitude, barrier_type, severity,
    description, photo_base64, ai_classification, verified, created_at
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11);
"#;

pub const SELECT_BARRIERS_NEAR: &str = r#"
SELECT * FROM barriers
WHERE latitude BETWEEN $1 - $3 AND $1 + $3
  AND longitude BETWEEN $2 - $3 AND $2 + $3
ORDER BY created_at DESC
LIMIT $4;
"#;

pub const INSERT_ALERT: &str = r#"
INSERT INTO alerts (
    id, latitude, longitude, alert_type, message, severity,
    radius, created_at, expires_at
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9);
"#;

pub const SELECT_ACTIVE_ALERTS_NEAR: &str = r#"
SELECT * FROM alerts
WHERE latitude BETWEEN $1 - $3 AND $1 + $3
  AND longitude BETWEEN $2 - $3 AND $2 + $3
  AND (expires_at IS NULL OR expires_at > NOW())
ORDER BY created_at DESC
LIMIT $4;
"#;

pub const INSERT_ROUTE: &str = r#"
INSERT INTO routes (
    id, user_id, start_lat, start_lng, end_lat, end_lng, mode,
    distance, duration, accessibility_score, waypoints, barriers, created_at
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13);
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (id, username, email, password, mode, is_premium, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7);
"#;

pub const SELECT_USER_BY_USERNAME: &str = r#"
SELECT * FROM users WHERE username = $1;
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT * FROM users WHERE id = $1;
"#;

pub const UPDATE_USER_MODE: &str = r#"
UPDATE users SET mode = $2 WHERE id = $1;
"#;

pub const UPDATE_USER_PREMIUM: &str = r#"
UPDATE users SET is_premium = true WHERE id = $1;
"#;
