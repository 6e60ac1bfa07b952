use crate::console::commands::CallableTrait;
use crate::db;
use actix_web::rt;
use anyhow::Context;
use dialoguer::{Confirm, Password};

pub const RESET_PASSWORD_ENV: &str = "RESET_PASSWORD";

/// `console users reset-passwords [--yes]`
///
/// Sets the same password on every account. The password comes from
/// `RESET_PASSWORD` or a hidden prompt, never from the command line.
pub struct ResetPasswordsCommand {
    pub yes: bool,
}

impl ResetPasswordsCommand {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }
}

fn read_password() -> anyhow::Result<String> {
    if let Ok(password) = std::env::var(RESET_PASSWORD_ENV) {
        if !password.is_empty() {
            return Ok(password);
        }
    }

    Password::new()
        .with_prompt("New password for every user")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()
        .context("Failed to read password")
}

impl CallableTrait for ResetPasswordsCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let yes = self.yes;

        rt::System::new().block_on(async move {
            let pool = super::connect().await?;
            let users = db::user::fetch_all(&pool)
                .await
                .map_err(anyhow::Error::msg)?;

            if users.is_empty() {
                println!("No users found");
                return Ok(());
            }

            let password = read_password()?;
            super::check_password(&password)?;

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Reset the password of {} user(s)?", users.len()))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("Aborted");
                    return Ok(());
                }
            }

            tracing::warn!(count = users.len(), "Resetting every user password");
            let report =
                super::reset_all(&pool, users.iter().map(|user| (user, password.as_str()))).await;
            println!("{}", report);

            Ok::<(), anyhow::Error>(())
        })?;

        Ok(())
    }
}
