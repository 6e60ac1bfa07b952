use crate::models;
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

const COLUMNS: &str = "id, username, name, email, password, role, created_at, updated_at";

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::User>, String> {
    let query_span = tracing::info_span!("Fetch all users.");
    sqlx::query_as::<_, models::User>(&format!(
        "SELECT {COLUMNS} FROM users ORDER BY created_at ASC"
    ))
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch users, error: {:?}", err);
        "Could not fetch users".to_string()
    })
}

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by id.", %id);
    sqlx::query_as::<_, models::User>(&format!("SELECT {COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch user, error: {:?}", err);
            "Could not fetch user".to_string()
        })
}

pub async fn insert(pool: &PgPool, user: models::User) -> Result<models::User, String> {
    let query_span = tracing::info_span!("Saving new user into the database");
    sqlx::query_as::<_, models::User>(&format!(
        r#"
        INSERT INTO users (id, username, name, email, password, role, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password)
    .bind(user.role)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to insert user, error: {:?}", err);
        "Failed to insert".to_string()
    })
}

/// Persists every updatable column. Returns `None` when the row vanished.
pub async fn update(pool: &PgPool, user: models::User) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Updating user", id = %user.id);
    sqlx::query_as::<_, models::User>(&format!(
        r#"
        UPDATE users
        SET username = $2, name = $3, email = $4, password = $5, role = $6
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password)
    .bind(user.role)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to update user, error: {:?}", err);
        "Failed to update user".to_string()
    })
}

pub async fn update_password(pool: &PgPool, id: Uuid, password_hash: &str) -> Result<bool, String> {
    let query_span = tracing::info_span!("Updating user password", %id);
    sqlx::query("UPDATE users SET password = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to update user password, error: {:?}", err);
            "Failed to update password".to_string()
        })
}
