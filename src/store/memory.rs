//! In-memory stores for tests. Same contracts as the Postgres stores,
//! including the circular proximity filter.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::geo;
use crate::models::alert::Alert;
use crate::models::barrier::Barrier;
use crate::models::location::Location;
use crate::models::route::Route;
use crate::models::user::User;
use crate::store::{AlertStore, BarrierStore, LocationStore, RouteStore, UserStore};

#[derive(Default)]
pub struct MemoryLocationStore {
    locations: Mutex<Vec<Location>>,
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn create(&self, location: Location) -> ServiceResult<Location> {
        self.locations.lock().unwrap().push(location.clone());
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
        let locations = self.locations.lock().unwrap();
        Ok(locations
            .iter()
            .filter(|l| {
                geo::planar_distance_m(latitude, longitude, l.latitude, l.longitude) <= radius_m
            })
            .filter(|l| min_score.map_or(true, |min| l.sanchara_score >= min))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryBarrierStore {
    barriers: Mutex<Vec<Barrier>>,
}

impl MemoryBarrierStore {
    pub fn with_barriers(barriers: Vec<Barrier>) -> Self {
        Self {
            barriers: Mutex::new(barriers),
        }
    }

    pub fn all(&self) -> Vec<Barrier> {
        self.barriers.lock().unwrap().clone()
    }
}

#[async_trait]
impl BarrierStore for MemoryBarrierStore {
    async fn create(&self, barrier: Barrier) -> ServiceResult<Barrier> {
        self.barriers.lock().unwrap().push(barrier.clone());
        Ok(barrier)
    }

    async fn query_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        limit: i64,
    ) -> ServiceResult<Vec<Barrier>> {
        let barriers = self.barriers.lock().unwrap();
        Ok(barriers
            .iter()
            .filter(|b| {
                geo::planar_distance_m(latitude, longitude, b.latitude, b.longitude) <= radius_m
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryAlertStore {
    alerts: Mutex<Vec<Alert>>,
}

impl MemoryAlertStore {
    pub fn all(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn create(&self, alert: Alert) -> ServiceResult<Alert> {
        self.alerts.lock().unwrap().push(alert.clone());
        Ok(alert)
    }

    async fn query_active_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        limit: i64,
    ) -> ServiceResult<Vec<Alert>> {
        let now = Utc::now().naive_utc();
        let alerts = self.alerts.lock().unwrap();
        Ok(alerts
            .iter()
            .filter(|a| a.expires_at.map_or(true, |exp| exp > now))
            .filter(|a| {
                geo::planar_distance_m(latitude, longitude, a.latitude, a.longitude) <= radius_m
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Route store with a failure toggle for exercising the unavailable path.
#[derive(Default)]
pub struct MemoryRouteStore {
    routes: Mutex<Vec<Route>>,
    fail: AtomicBool,
}

impl MemoryRouteStore {
    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouteStore for MemoryRouteStore {
    async fn create(&self, route: Route) -> ServiceResult<Route> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("datastore offline".to_string()));
        }
        self.routes.lock().unwrap().push(route.clone());
        Ok(route)
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn register(&self, user: User) -> ServiceResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(ServiceError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn authenticate(&self, username: &str, password: &str) -> ServiceResult<User> {
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
            .ok_or(ServiceError::Unauthorized)
    }

    async fn get(&self, id: Uuid) -> ServiceResult<User> {
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", id)))
    }

    async fn set_mode(&self, id: Uuid, mode: &str) -> ServiceResult<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.mode = mode.to_string();
                Ok(())
            }
            None => Err(ServiceError::NotFound(format!("user {}", id))),
        }
    }

    async fn set_premium(&self, id: Uuid) -> ServiceResult<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_premium = true;
                Ok(())
            }
            None => Err(ServiceError::NotFound(format!("user {}", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "hunter2".to_string(),
            mode: "wheelchair".to_string(),
            is_premium: false,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let store = MemoryUserStore::default();
        store.register(user("asha")).await.unwrap();
        let err = store.register(user("asha")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let store = MemoryUserStore::default();
        store.register(user("asha")).await.unwrap();
        assert!(store.authenticate("asha", "hunter2").await.is_ok());
        let err = store.authenticate("asha", "wrong").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
        let err = store.authenticate("nobody", "hunter2").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = MemoryUserStore::default();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = store.set_mode(Uuid::new_v4(), "blind").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn mode_and_premium_updates_apply() {
        let store = MemoryUserStore::default();
        let registered = store.register(user("ravi")).await.unwrap();
        store.set_mode(registered.id, "blind").await.unwrap();
        store.set_premium(registered.id).await.unwrap();
        let fetched = store.get(registered.id).await.unwrap();
        assert_eq!(fetched.mode, "blind");
        assert!(fetched.is_premium);
    }
}
