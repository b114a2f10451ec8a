use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    /// Accessibility mode the client defaults to: blind, deaf or wheelchair.
    pub mode: String,
    pub is_premium: bool,
    pub created_at: NaiveDateTime,
}
