use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserState {
    On,
    Off,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub uuid: Uuid,
    pub username: String,
    pub nickname: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub active: bool,
    pub state: Option<UserState>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub nickname: String,
}

/// Replacement values applied by an update. `username` is the new username,
/// which may equal the one used to look the row up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub username: String,
    pub password: String,
    pub nickname: String,
}
