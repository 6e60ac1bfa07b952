mod list;
mod reset_from_file;
mod reset_passwords;
mod search;

pub use list::ListCommand;
pub use reset_from_file::ResetFromFileCommand;
pub use reset_passwords::ResetPasswordsCommand;
pub use search::SearchCommand;

use crate::configuration::get_configuration;
use crate::{db, helpers, models};
use anyhow::Context;
use sqlx::PgPool;
use std::fmt;

const MIN_PASSWORD_LEN: usize = 8;

async fn connect() -> anyhow::Result<PgPool> {
    let settings = get_configuration().context("Failed to read configuration")?;
    PgPool::connect(&settings.database.connection_string())
        .await
        .context("Failed to connect to database")
}

fn check_password(password: &str) -> anyhow::Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        anyhow::bail!("password must be at least {MIN_PASSWORD_LEN} characters");
    }
    Ok(())
}

/// Outcome of a bulk password reset. Failures never abort the run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl fmt::Display for ResetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "updated: {}, failed: {}, skipped: {}",
            self.updated, self.failed, self.skipped
        )
    }
}

/// Hashes with a fresh salt and stores the result for one user.
async fn reset_one(pool: &PgPool, user: &models::User, password: &str) -> Result<(), String> {
    let hash = helpers::hash_password(password).map_err(|err| err.to_string())?;
    if !db::user::update_password(pool, user.id, &hash).await? {
        return Err("user no longer exists".to_string());
    }
    Ok(())
}

/// Applies every reset in order, counting instead of stopping on failure.
async fn reset_all<'a, I>(pool: &PgPool, resets: I) -> ResetReport
where
    I: IntoIterator<Item = (&'a models::User, &'a str)>,
{
    let mut report = ResetReport::default();
    for (user, password) in resets {
        match reset_one(pool, user, password).await {
            Ok(()) => {
                tracing::info!(user = %user.username, "Password reset");
                println!("  reset {}", user.username);
                report.updated += 1;
            }
            Err(err) => {
                tracing::error!(user = %user.username, "Password reset failed: {}", err);
                eprintln!("  failed {}: {}", user.username, err);
                report.failed += 1;
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;
    use uuid::Uuid;

    fn user(username: &str) -> models::User {
        models::User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            name: username.to_string(),
            email: format!("{username}@example.com"),
            password: String::new(),
            role: models::Role::Customer,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn test_reset_all_attempts_every_user_when_each_fails() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy("postgresql://nobody@127.0.0.1:1/skinstore")
            .unwrap();
        let users = vec![user("ana"), user("bob"), user("cleo")];

        let report = reset_all(
            &pool,
            users.iter().map(|user| (user, "long enough password")),
        )
        .await;

        assert_eq!(
            report,
            ResetReport {
                updated: 0,
                failed: 3,
                skipped: 0,
            }
        );
    }

    #[test]
    fn test_report_summary() {
        let report = ResetReport {
            updated: 3,
            failed: 1,
            skipped: 2,
        };
        assert_eq!(report.to_string(), "updated: 3, failed: 1, skipped: 2");
    }

    #[test]
    fn test_short_password_is_rejected() {
        assert!(check_password("short").is_err());
        assert!(check_password("long enough").is_ok());
    }
}
