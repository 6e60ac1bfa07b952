pub mod authentication;

pub use authentication::AdminAccess;
