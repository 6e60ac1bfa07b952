pub mod server;
pub mod socket;

pub use server::{Apply, LiveCommand, LiveEvent, LiveStreamServer, Snapshot, Subscribe, Unsubscribe};
pub use socket::{validate_chat, LiveStreamSocket};
