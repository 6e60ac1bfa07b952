pub mod faq;
pub mod livestream;
pub mod user;

pub use faq::*;
pub use livestream::{ChatMessage, LiveSession, LiveSnapshot, StreamInfo, StreamPatch};
pub use user::*;
