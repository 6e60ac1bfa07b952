//! External service connectors.

pub mod errors;
pub mod generative;

pub use errors::ConnectorError;
pub use generative::{GeminiClient, TextGenerator};
