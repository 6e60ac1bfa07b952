mod add;
mod delete;
mod get;
mod update;

pub use add::*;
pub use delete::*;
pub use get::*;
pub use update::*;
