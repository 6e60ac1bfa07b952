use super::server::{Apply, LiveCommand, LiveEvent, LiveStreamServer, Subscribe, Unsubscribe};
use actix::{Actor, ActorContext, Addr, AsyncContext, Handler, StreamHandler};
use actix_web_actors::ws;
use serde::Deserialize;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// WebSocket heartbeat interval
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// Client timeout - close connection if no heartbeat received
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_AUTHOR_LEN: usize = 50;
const MAX_CHAT_TEXT_LEN: usize = 500;

/// Frames a viewer may send over the socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ViewerFrame {
    Chat { author: String, text: String },
}

/// One connected viewer. Receives every `LiveEvent` as a JSON text frame.
pub struct LiveStreamSocket {
    id: Uuid,
    server: Addr<LiveStreamServer>,
    hb: Instant,
}

impl LiveStreamSocket {
    pub fn new(server: Addr<LiveStreamServer>) -> Self {
        Self {
            id: Uuid::new_v4(),
            server,
            hb: Instant::now(),
        }
    }

    /// Start heartbeat process to check connection health
    fn hb(&self, ctx: &mut <Self as Actor>::Context) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                tracing::warn!(socket = %act.id, "Livestream client heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }

            ctx.ping(b"");
        });
    }

    fn handle_text(&self, text: &str) {
        let frame: ViewerFrame = match serde_json::from_str(text) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::debug!(socket = %self.id, "Ignoring malformed viewer frame: {}", err);
                return;
            }
        };

        match frame {
            ViewerFrame::Chat { author, text } => {
                match validate_chat(&author, &text) {
                    Ok((author, text)) => self
                        .server
                        .do_send(Apply(LiveCommand::AddChatMessage { author, text })),
                    Err(reason) => {
                        tracing::debug!(socket = %self.id, "Dropping chat frame: {}", reason)
                    }
                }
            }
        }
    }
}

/// Trims and bounds a chat message before it reaches the session.
pub fn validate_chat(author: &str, text: &str) -> Result<(String, String), String> {
    let author = author.trim();
    let text = text.trim();
    if author.is_empty() || text.is_empty() {
        return Err("author and text must not be empty".to_string());
    }
    if author.chars().count() > MAX_AUTHOR_LEN {
        return Err(format!("author is longer than {MAX_AUTHOR_LEN} characters"));
    }
    if text.chars().count() > MAX_CHAT_TEXT_LEN {
        return Err(format!("text is longer than {MAX_CHAT_TEXT_LEN} characters"));
    }
    Ok((author.to_string(), text.to_string()))
}

impl Actor for LiveStreamSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::info!(socket = %self.id, "Livestream socket connected");
        self.hb(ctx);
        self.server.do_send(Subscribe {
            id: self.id,
            recipient: ctx.address().recipient(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.server.do_send(Unsubscribe { id: self.id });
        tracing::info!(socket = %self.id, "Livestream socket closed");
    }
}

impl Handler<LiveEvent> for LiveStreamSocket {
    type Result = ();

    fn handle(&mut self, msg: LiveEvent, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(err) => tracing::error!(socket = %self.id, "Failed to encode event: {}", err),
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for LiveStreamSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.hb = Instant::now();
                self.handle_text(&text);
            }
            Ok(ws::Message::Binary(_)) => {
                tracing::warn!("Binary messages are not supported on the livestream socket");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(err) => {
                tracing::warn!(socket = %self.id, "Livestream socket protocol error: {}", err);
                ctx.stop();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_chat_trims() {
        let (author, text) = validate_chat("  ana ", " love this serum ").unwrap();
        assert_eq!(author, "ana");
        assert_eq!(text, "love this serum");
    }

    #[test]
    fn test_validate_chat_rejects_blank_and_long() {
        assert!(validate_chat(" ", "hi").is_err());
        assert!(validate_chat("ana", "   ").is_err());
        assert!(validate_chat(&"a".repeat(51), "hi").is_err());
        assert!(validate_chat("ana", &"x".repeat(501)).is_err());
    }

    #[test]
    fn test_viewer_frame_format() {
        let frame: ViewerFrame =
            serde_json::from_str(r#"{"type": "chat", "author": "ana", "text": "hi"}"#).unwrap();
        let ViewerFrame::Chat { author, text } = frame;
        assert_eq!(author, "ana");
        assert_eq!(text, "hi");
    }
}
