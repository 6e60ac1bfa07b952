mod ping;

pub use ping::PingCommand;
