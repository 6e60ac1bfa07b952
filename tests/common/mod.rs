#![allow(dead_code)]

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use skinstore::configuration::{get_configuration, DatabaseSettings, Settings};
use skinstore::helpers::hash_password;
use skinstore::models::{Faq, FaqCategory, Role, User};
use uuid::Uuid;

pub const ADMIN_TOKEN: &str = "test-admin-token";

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("{}{}", self.address.replacen("http", "ws", 1), path)
    }
}

fn test_configuration() -> Settings {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.admin_token = Some(ADMIN_TOKEN.to_string());
    // every test gets its own database, built from the parts
    configuration.database.url = None;
    configuration
}

async fn serve(listener: std::net::TcpListener, pool: PgPool, configuration: Settings) -> String {
    let port = listener.local_addr().unwrap().port();
    let server = skinstore::startup::run(listener, pool, configuration)
        .await
        .expect("Failed to bind address.");

    let _ = actix_web::rt::spawn(server);
    println!("Used Port: {}", port);

    format!("http://127.0.0.1:{}", port)
}

/// Server backed by a fresh, migrated database. `None` when PostgreSQL is
/// unreachable, so callers can skip.
pub async fn spawn_app() -> Option<TestApp> {
    let mut configuration = test_configuration();
    configuration.database.database_name = Uuid::new_v4().to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let address = serve(listener, connection_pool.clone(), configuration).await;

    Some(TestApp {
        address,
        db_pool: connection_pool,
    })
}

/// Server whose pool never connects until used. Enough for routes that do not
/// touch the database (health, livestream).
pub async fn spawn_app_without_db() -> TestApp {
    let configuration = test_configuration();
    let connection_pool = PgPoolOptions::new()
        .connect_lazy(&configuration.database.connection_string())
        .expect("Failed to build lazy pool");

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let address = serve(listener, connection_pool.clone(), configuration).await;

    TestApp {
        address,
        db_pool: connection_pool,
    }
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

pub async fn create_user(pool: &PgPool, username: &str, password: &str) -> User {
    let user = User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        name: username.to_string(),
        email: format!("{}@example.com", username),
        password: hash_password(password).expect("Failed to hash password"),
        role: Role::Customer,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };

    skinstore::db::user::insert(pool, user)
        .await
        .expect("Failed to insert user")
}

pub async fn create_faq(pool: &PgPool, question: &str, category: FaqCategory, priority: i32) -> Faq {
    let mut faq = Faq::new(question.to_string(), format!("Answer to: {}", question));
    faq.category = category;
    faq.priority = priority;

    skinstore::db::faq::insert(pool, faq)
        .await
        .expect("Failed to insert faq")
}
