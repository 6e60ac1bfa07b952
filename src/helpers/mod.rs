pub(crate) mod json;
pub mod password;

pub use json::*;
pub use password::{hash_password, verify_password, PasswordError};
