use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    #[serde(default)]
    pub livestream: LivestreamSettings,
    #[serde(default)]
    pub generative: GenerativeSettings,
    // Bearer token for the /admin scopes, only ever read from ADMIN_TOKEN
    #[serde(skip)]
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    // Full connection string from DATABASE_URL, wins over the parts above
    #[serde(skip)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct LivestreamSettings {
    pub chat_capacity: usize,
}

impl Default for LivestreamSettings {
    fn default() -> Self {
        Self {
            chat_capacity: crate::models::livestream::DEFAULT_CHAT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct GenerativeSettings {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GenerativeSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 60,
        }
    }
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Only the `generative` section. `configuration.yaml` is optional here, so
/// commands that never touch the database work from any directory.
pub fn get_generative_configuration() -> Result<GenerativeSettings, config::ConfigError> {
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    match settings.get::<GenerativeSettings>("generative") {
        Ok(generative) => Ok(generative),
        Err(config::ConfigError::NotFound(_)) => Ok(GenerativeSettings::default()),
        Err(err) => Err(err),
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        // APP__DATABASE__HOST=... overrides database.host
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    config.database.url = non_empty_env("DATABASE_URL");
    config.admin_token = non_empty_env("ADMIN_TOKEN");

    Ok(config)
}
