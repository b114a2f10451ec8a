//! Collaborator datastore seams.
//!
//! The engines only see these traits; production wires the Postgres
//! implementations from [`pg`], tests use the in-memory ones.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ServiceResult;
use crate::models::alert::Alert;
use crate::models::barrier::Barrier;
use crate::models::location::Location;
use crate::models::route::Route;
use crate::models::user::User;

pub mod pg;

#[cfg(test)]
pub mod memory;

#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn create(&self, location: Location) -> ServiceResult<Location>;

    /// Locations within `radius_m` of a point, newest first, optionally
    /// filtered to a minimum sanchara score.
    async fn query_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        min_score: Option<f64>,
        limit: i64,
    ) -> ServiceResult<Vec<Location>>;
}

#[async_trait]
pub trait BarrierStore: Send + Sync {
    async fn create(&self, barrier: Barrier) -> ServiceResult<Barrier>;

    /// Barriers within `radius_m` of a point, newest first.
    async fn query_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        limit: i64,
    ) -> ServiceResult<Vec<Barrier>>;
}

#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn create(&self, alert: Alert) -> ServiceResult<Alert>;

    /// Unexpired alerts within `radius_m` of a point, newest first.
    async fn query_active_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        limit: i64,
    ) -> ServiceResult<Vec<Alert>>;
}

#[async_trait]
pub trait RouteStore: Send + Sync {
    async fn create(&self, route: Route) -> ServiceResult<Route>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the username is taken.
    async fn register(&self, user: User) -> ServiceResult<User>;

    /// Fails with `Unauthorized` on unknown username or wrong password.
    async fn authenticate(&self, username: &str, password: &str) -> ServiceResult<User>;

    async fn get(&self, id: Uuid) -> ServiceResult<User>;

    async fn set_mode(&self, id: Uuid, mode: &str) -> ServiceResult<()>;

    async fn set_premium(&self, id: Uuid) -> ServiceResult<()>;
}
