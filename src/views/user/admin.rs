use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::From;
use uuid::Uuid;

/// User as shown on the admin screens. The password hash never leaves the
/// model layer.
#[derive(Debug, Serialize)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: models::Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::User> for Admin {
    fn from(user: models::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
