use crate::console::commands::CallableTrait;
use crate::{db, models};
use actix_web::rt;

pub struct ListCommand;

impl ListCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListCommand {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn print_table(users: &[models::User]) {
    println!("{:<36}  {:<20}  {:<32}  {}", "ID", "USERNAME", "EMAIL", "ROLE");
    for user in users {
        println!(
            "{:<36}  {:<20}  {:<32}  {}",
            user.id,
            user.username,
            user.email,
            user.role.as_str()
        );
    }
    println!("{} user(s)", users.len());
}

impl CallableTrait for ListCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async {
            let pool = super::connect().await?;
            let users = db::user::fetch_all(&pool)
                .await
                .map_err(anyhow::Error::msg)?;

            print_table(&users);
            Ok::<(), anyhow::Error>(())
        })?;

        Ok(())
    }
}
