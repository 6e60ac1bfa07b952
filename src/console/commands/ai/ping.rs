use crate::configuration::get_generative_configuration;
use crate::connectors::{GeminiClient, TextGenerator};
use crate::console::commands::CallableTrait;
use actix_web::rt;
use anyhow::Context;

pub const DEFAULT_PROMPT: &str = "Reply with one short sentence confirming you are reachable.";

/// `console ai ping [--prompt <text>]`
///
/// Sends one prompt to the generative API and prints the answer. The key is
/// read from `GEMINI_API_KEY`.
pub struct PingCommand {
    pub prompt: Option<String>,
}

impl PingCommand {
    pub fn new(prompt: Option<String>) -> Self {
        Self { prompt }
    }
}

async fn ping(generator: &dyn TextGenerator, prompt: &str) -> anyhow::Result<String> {
    let text = generator
        .generate(prompt)
        .await
        .context("Generative API call failed")?;
    Ok(text.trim().to_string())
}

impl CallableTrait for PingCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        let settings = get_generative_configuration().context("Failed to read configuration")?;
        let client = GeminiClient::from_env(&settings)?;
        let prompt = self
            .prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string());

        let text = rt::System::new().block_on(async move { ping(&client, &prompt).await })?;
        println!("{}", text);

        Ok(())
    }
}
