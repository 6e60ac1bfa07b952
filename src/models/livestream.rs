use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Number of chat messages kept when nothing else is configured.
pub const DEFAULT_CHAT_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub title: String,
    pub description: String,
    pub started_at: Option<DateTime<Utc>>,
    pub viewer_count: i64,
    pub likes: i64,
    pub stream_url: String,
    pub quality: String,
}

impl Default for StreamInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            started_at: None,
            viewer_count: 0,
            likes: 0,
            stream_url: String::new(),
            quality: "HD".to_string(),
        }
    }
}

/// Partial stream metadata. Present fields overwrite, absent ones are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub viewer_count: Option<i64>,
    pub likes: Option<i64>,
    pub stream_url: Option<String>,
    pub quality: Option<String>,
}

impl StreamPatch {
    fn merge_into(self, info: &mut StreamInfo) {
        if let Some(title) = self.title {
            info.title = title;
        }
        if let Some(description) = self.description {
            info.description = description;
        }
        if let Some(viewer_count) = self.viewer_count {
            info.viewer_count = viewer_count;
        }
        if let Some(likes) = self.likes {
            info.likes = likes;
        }
        if let Some(stream_url) = self.stream_url {
            info.stream_url = stream_url;
        }
        if let Some(quality) = self.quality {
            info.quality = quality;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub author: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(author: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            text,
            sent_at: Utc::now(),
        }
    }
}

/// Read-only copy of the session handed out to routes and sockets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    pub is_streaming: bool,
    pub stream: StreamInfo,
    pub chat_messages: Vec<ChatMessage>,
}

/// The live session aggregate. It is owned by exactly one
/// `LiveStreamServer` actor; nothing else mutates it.
#[derive(Debug, Clone)]
pub struct LiveSession {
    is_streaming: bool,
    stream: StreamInfo,
    chat: VecDeque<ChatMessage>,
    chat_capacity: usize,
}

impl Default for LiveSession {
    fn default() -> Self {
        Self::new(DEFAULT_CHAT_CAPACITY)
    }
}

impl LiveSession {
    pub fn new(chat_capacity: usize) -> Self {
        Self {
            is_streaming: false,
            stream: StreamInfo::default(),
            chat: VecDeque::with_capacity(chat_capacity),
            chat_capacity,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.is_streaming
    }

    pub fn stream(&self) -> &StreamInfo {
        &self.stream
    }

    pub fn chat_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.chat.iter()
    }

    pub fn chat_len(&self) -> usize {
        self.chat.len()
    }

    pub fn start(&mut self, patch: StreamPatch, now: DateTime<Utc>) {
        self.is_streaming = true;
        patch.merge_into(&mut self.stream);
        self.stream.started_at = Some(now);
    }

    /// Only the streaming flag and start time change; title, counters and
    /// chat keep their last values.
    pub fn stop(&mut self) {
        self.is_streaming = false;
        self.stream.started_at = None;
    }

    pub fn set_viewer_count(&mut self, count: i64) {
        self.stream.viewer_count = count;
    }

    pub fn set_likes(&mut self, likes: i64) {
        self.stream.likes = likes;
    }

    pub fn add_chat_message(&mut self, message: ChatMessage) {
        self.chat.push_back(message);
        while self.chat.len() > self.chat_capacity {
            self.chat.pop_front();
        }
    }

    pub fn clear_chat_messages(&mut self) {
        self.chat.clear();
    }

    pub fn snapshot(&self) -> LiveSnapshot {
        LiveSnapshot {
            is_streaming: self.is_streaming,
            stream: self.stream.clone(),
            chat_messages: self.chat.iter().cloned().collect(),
        }
    }
}
