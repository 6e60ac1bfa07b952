mod admin;
mod getheader;

pub use admin::*;
pub use getheader::*;
