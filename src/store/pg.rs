//! Postgres-backed stores.
//!
//! Bounding-box SQL narrows candidates; the exact circular check runs in
//! process because coordinates are plain float8 columns, not PostGIS.

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::{queries, DbPool};
use crate::error::{ServiceError, ServiceResult};
use crate::geo;
use crate::models::alert::Alert;
use crate::models::barrier::Barrier;
use crate::models::location::Location;
use crate::models::route::Route;
use crate::models::user::User;
use crate::store::{AlertStore, BarrierStore, LocationStore, RouteStore, UserStore};

fn radius_degrees(radius_m: f64) -> f64 {
    radius_m / geo::METERS_PER_DEGREE
}

pub struct PgLocationStore {
    pool: DbPool,
}

impl PgLocationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for PgLocationStore {
    async fn create(&self, location: Location) -> ServiceResult<Location> {
        sqlx::query(queries::INSERT_LOCATION)
            .bind(location.id)
            .bind(&location.name)
            .bind(location.latitude)
            .bind(location.longitude)
            .bind(&location.address)
            .bind(location.sanchara_score)
            .bind(location.has_ramp)
            .bind(location.has_elevator)
            .bind(location.has_stairs)
            .bind(&location.surface_type)
            .bind(&location.incline_level)
            .bind(&location.description)
            .bind(location.created_at)
            .execute(&self.pool)
            .await?;
        Ok(location)
    }

    async fn query_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        min_score: Option<f64>,
        limit: i64,
    ) -> ServiceResult<Vec<Location>> {
        let rows: Vec<Location> = sqlx::query_as(queries::SELECT_LOCATIONS_NEAR)
            .bind(latitude)
            .bind(longitude)
            .bind(radius_degrees(radius_m))
            .bind(min_score)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .filter(|l| {
                geo::planar_distance_m(latitude, longitude, l.latitude, l.longitude) <= radius_m
            })
            .collect())
    }
}

pub struct PgBarrierStore {
    pool: DbPool,
}

impl PgBarrierStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BarrierStore for PgBarrierStore {
    async fn create(&self, barrier: Barrier) -> ServiceResult<Barrier> {
        sqlx::query(queries::INSERT_BARRIER)
            .bind(barrier.id)
            .bind(barrier.user_id)
            .bind(barrier.latitude)
            .bind(barrier.longitude)
            .bind(&barrier.barrier_type)
            .bind(&barrier.severity)
            .bind(&barrier.description)
            .bind(&barrier.photo_base64)
            .bind(&barrier.ai_classification)
            .bind(barrier.verified)
            .bind(barrier.created_at)
            .execute(&self.pool)
            .await?;
        Ok(barrier)
    }

    async fn query_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        limit: i64,
    ) -> ServiceResult<Vec<Barrier>> {
        let rows: Vec<Barrier> = sqlx::query_as(queries::SELECT_BARRIERS_NEAR)
            .bind(latitude)
            .bind(longitude)
            .bind(radius_degrees(radius_m))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .filter(|b| {
                geo::planar_distance_m(latitude, longitude, b.latitude, b.longitude) <= radius_m
            })
            .collect())
    }
}

pub struct PgAlertStore {
    pool: DbPool,
}

impl PgAlertStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertStore for PgAlertStore {
    async fn create(&self, alert: Alert) -> ServiceResult<Alert> {
        sqlx::query(queries::INSERT_ALERT)
            .bind(alert.id)
            .bind(alert.latitude)
            .bind(alert.longitude)
            .bind(&alert.alert_type)
            .bind(&alert.message)
            .bind(&alert.severity)
            .bind(alert.radius)
            .bind(alert.created_at)
            .bind(alert.expires_at)
            .execute(&self.pool)
            .await?;
        Ok(alert)
    }

    async fn query_active_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        limit: i64,
    ) -> ServiceResult<Vec<Alert>> {
        let rows: Vec<Alert> = sqlx::query_as(queries::SELECT_ACTIVE_ALERTS_NEAR)
            .bind(latitude)
            .bind(longitude)
            .bind(radius_degrees(radius_m))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .filter(|a| {
                geo::planar_distance_m(latitude, longitude, a.latitude, a.longitude) <= radius_m
            })
            .collect())
    }
}

pub struct PgRouteStore {
    pool: DbPool,
}

impl PgRouteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteStore for PgRouteStore {
    async fn create(&self, route: Route) -> ServiceResult<Route> {
        sqlx::query(queries::INSERT_ROUTE)
            .bind(route.id)
            .bind(route.user_id)
            .bind(route.start_lat)
            .bind(route.start_lng)
            .bind(route.end_lat)
            .bind(route.end_lng)
            .bind(&route.mode)
            .bind(route.distance)
            .bind(route.duration)
            .bind(route.accessibility_score)
            .bind(&route.waypoints)
            .bind(&route.barriers)
            .bind(route.created_at)
            .execute(&self.pool)
            .await?;
        Ok(route)
    }
}

pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn register(&self, user: User) -> ServiceResult<User> {
        let existing: Option<User> = sqlx::query_as(queries::SELECT_USER_BY_USERNAME)
            .bind(&user.username)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        sqlx::query(queries::INSERT_USER)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.mode)
            .bind(user.is_premium)
            .bind(user.created_at)
            .execute(&self.pool)
            .await?;
        Ok(user)
    }

    async fn authenticate(&self, username: &str, password: &str) -> ServiceResult<User> {
        let user: Option<User> = sqlx::query_as(queries::SELECT_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        match user {
            Some(user) if user.password == password => Ok(user),
            _ => Err(ServiceError::Unauthorized),
        }
    }

    async fn get(&self, id: Uuid) -> ServiceResult<User> {
        let user: Option<User> = sqlx::query_as(queries::SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        user.ok_or_else(|| ServiceError::NotFound(format!("user {}", id)))
    }

    async fn set_mode(&self, id: Uuid, mode: &str) -> ServiceResult<()> {
        let result = sqlx::query(queries::UPDATE_USER_MODE)
            .bind(id)
            .bind(mode)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    async fn set_premium(&self, id: Uuid) -> ServiceResult<()> {
        let result = sqlx::query(queries::UPDATE_USER_PREMIUM)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }
}
