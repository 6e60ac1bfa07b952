pub mod faq;
pub mod health_checks;
pub mod livestream;
pub mod user;

pub use health_checks::*;
