pub mod faq;
pub mod user;

pub use faq::{FaqForm, FaqPatch};
pub use user::UserPatch;
