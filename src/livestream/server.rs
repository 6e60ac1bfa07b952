use crate::models::livestream::{ChatMessage, LiveSession, LiveSnapshot, StreamPatch};
use actix::{Actor, Context, Handler, Message, MessageResult, Recipient};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A change requested by an admin screen, a viewer socket or a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LiveCommand {
    Start(StreamPatch),
    Stop,
    SetViewerCount { count: i64 },
    SetLikes { likes: i64 },
    AddChatMessage { author: String, text: String },
    ClearChatMessages,
}

/// Pushed to every subscriber after a command has been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Message)]
#[rtype(result = "()")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// Full state, sent once when a subscriber joins.
    Snapshot { state: LiveSnapshot },
    StreamStarted { state: LiveSnapshot },
    StreamStopped { state: LiveSnapshot },
    ViewerCountChanged { viewer_count: i64 },
    LikesChanged { likes: i64 },
    ChatMessageAdded { message: ChatMessage },
    ChatCleared,
}

#[derive(Message)]
#[rtype(result = "LiveSnapshot")]
pub struct Apply(pub LiveCommand);

#[derive(Message)]
#[rtype(result = "LiveSnapshot")]
pub struct Snapshot;

#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe {
    pub id: Uuid,
    pub recipient: Recipient<LiveEvent>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Unsubscribe {
    pub id: Uuid,
}

/// Owns the single live session. The actor mailbox serialises every writer,
/// so concurrent admin screens see one consistent order of changes.
pub struct LiveStreamServer {
    session: LiveSession,
    subscribers: HashMap<Uuid, Recipient<LiveEvent>>,
}

impl LiveStreamServer {
    pub fn new(chat_capacity: usize) -> Self {
        Self {
            session: LiveSession::new(chat_capacity),
            subscribers: HashMap::new(),
        }
    }

    fn apply(&mut self, command: LiveCommand) -> LiveEvent {
        match command {
            LiveCommand::Start(patch) => {
                self.session.start(patch, Utc::now());
                tracing::info!(title = %self.session.stream().title, "Livestream started");
                LiveEvent::StreamStarted {
                    state: self.session.snapshot(),
                }
            }
            LiveCommand::Stop => {
                self.session.stop();
                tracing::info!("Livestream stopped");
                LiveEvent::StreamStopped {
                    state: self.session.snapshot(),
                }
            }
            LiveCommand::SetViewerCount { count } => {
                self.session.set_viewer_count(count);
                LiveEvent::ViewerCountChanged {
                    viewer_count: count,
                }
            }
            LiveCommand::SetLikes { likes } => {
                self.session.set_likes(likes);
                LiveEvent::LikesChanged { likes }
            }
            LiveCommand::AddChatMessage { author, text } => {
                let message = ChatMessage::new(author, text);
                self.session.add_chat_message(message.clone());
                LiveEvent::ChatMessageAdded { message }
            }
            LiveCommand::ClearChatMessages => {
                self.session.clear_chat_messages();
                tracing::info!("Livestream chat cleared");
                LiveEvent::ChatCleared
            }
        }
    }

    fn broadcast(&self, event: &LiveEvent) {
        for recipient in self.subscribers.values() {
            recipient.do_send(event.clone());
        }
    }
}

impl Default for LiveStreamServer {
    fn default() -> Self {
        Self::new(crate::models::livestream::DEFAULT_CHAT_CAPACITY)
    }
}

impl Actor for LiveStreamServer {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("Livestream server started");
    }
}

impl Handler<Apply> for LiveStreamServer {
    type Result = MessageResult<Apply>;

    fn handle(&mut self, msg: Apply, _ctx: &mut Self::Context) -> Self::Result {
        let event = self.apply(msg.0);
        self.broadcast(&event);
        MessageResult(self.session.snapshot())
    }
}

impl Handler<Snapshot> for LiveStreamServer {
    type Result = MessageResult<Snapshot>;

    fn handle(&mut self, _msg: Snapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.snapshot())
    }
}

impl Handler<Subscribe> for LiveStreamServer {
    type Result = ();

    fn handle(&mut self, msg: Subscribe, _ctx: &mut Self::Context) {
        msg.recipient.do_send(LiveEvent::Snapshot {
            state: self.session.snapshot(),
        });
        self.subscribers.insert(msg.id, msg.recipient);
        tracing::debug!(subscribers = self.subscribers.len(), "Livestream subscriber joined");
    }
}

impl Handler<Unsubscribe> for LiveStreamServer {
    type Result = ();

    fn handle(&mut self, msg: Unsubscribe, _ctx: &mut Self::Context) {
        self.subscribers.remove(&msg.id);
        tracing::debug!(subscribers = self.subscribers.len(), "Livestream subscriber left");
    }
}
