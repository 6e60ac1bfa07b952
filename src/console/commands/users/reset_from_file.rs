use crate::console::commands::CallableTrait;
use crate::{db, models};
use actix_web::rt;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// `console users reset-from-file --file <yaml>`
///
/// The file maps usernames to new passwords:
///
/// ```yaml
/// ana: "a long new password"
/// admin: "another long password"
/// ```
pub struct ResetFromFileCommand {
    pub file: PathBuf,
}

impl ResetFromFileCommand {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }
}

fn parse_password_file(content: &str) -> anyhow::Result<BTreeMap<String, String>> {
    let passwords: BTreeMap<String, String> =
        serde_yaml::from_str(content).context("Expected a map of username: password")?;

    for (username, password) in &passwords {
        super::check_password(password).with_context(|| format!("Entry for {username}"))?;
    }

    Ok(passwords)
}

/// Pairs each entry with its account. Entries without an account come back
/// separately so they can be reported and skipped.
fn plan<'a>(
    users: &'a [models::User],
    passwords: &'a BTreeMap<String, String>,
) -> (Vec<(&'a models::User, &'a str)>, Vec<&'a str>) {
    let mut resets = vec![];
    let mut unknown = vec![];

    for (username, password) in passwords {
        match users.iter().find(|user| &user.username == username) {
            Some(user) => resets.push((user, password.as_str())),
            None => unknown.push(username.as_str()),
        }
    }

    (resets, unknown)
}

impl CallableTrait for ResetFromFileCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let passwords = parse_password_file(&content)?;

        rt::System::new().block_on(async move {
            let pool = super::connect().await?;
            let users = db::user::fetch_all(&pool)
                .await
                .map_err(anyhow::Error::msg)?;

            let (resets, unknown) = plan(&users, &passwords);
            for username in &unknown {
                tracing::warn!(user = %username, "No such user, skipping");
                println!("  skipped {}: no such user", username);
            }

            let mut report = super::reset_all(&pool, resets).await;
            report.skipped = unknown.len();
            println!("{}", report);

            Ok::<(), anyhow::Error>(())
        })?;

        Ok(())
    }
}
