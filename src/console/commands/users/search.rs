use crate::console::commands::CallableTrait;
use crate::db;
use actix_web::rt;
use anyhow::Context;
use regex::{Regex, RegexBuilder};

/// `console users search --pattern <regex>`
///
/// Case-insensitive match against username, name and email.
pub struct SearchCommand {
    pub pattern: String,
}

impl SearchCommand {
    pub fn new(pattern: String) -> Self {
        Self { pattern }
    }
}

fn build_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

impl CallableTrait for SearchCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        // reject a bad pattern before touching the database
        let pattern = build_pattern(&self.pattern)
            .with_context(|| format!("Invalid pattern {:?}", self.pattern))?;

        rt::System::new().block_on(async move {
            let pool = super::connect().await?;
            let users = db::user::fetch_all(&pool)
                .await
                .map_err(anyhow::Error::msg)?;

            let found: Vec<_> = users
                .into_iter()
                .filter(|user| user.matches(&pattern))
                .collect();
            super::list::print_table(&found);

            Ok::<(), anyhow::Error>(())
        })?;

        Ok(())
    }
}
