pub mod ai;
mod callable;
pub mod mobile;
pub mod users;

pub use callable::*;
