pub mod faq;
pub mod user;
