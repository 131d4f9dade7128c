use crate::persona::Emotion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title shown for a session whose persona has no name yet.
pub const DEFAULT_SESSION_TITLE: &str = "New Session";

pub type SessionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    Researcher,
    Persona,
}

/// User-supplied description of the persona to simulate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaFields {
    pub name: String,
    pub role: String,
    pub traits: String,
    pub scope: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub role: String,
    pub traits: String,
    pub scope: String,
    pub is_initialized: bool,
}

impl Persona {
    pub fn from_fields(fields: PersonaFields) -> Self {
        Self {
            name: fields.name,
            role: fields.role,
            traits: fields.traits,
            scope: fields.scope,
            is_initialized: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// Only set on persona-authored messages.
    pub emotion: Option<Emotion>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn researcher(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Researcher,
            content: content.into(),
            emotion: None,
            timestamp: Utc::now(),
        }
    }

    pub fn persona(content: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Persona,
            content: content.into(),
            emotion: Some(emotion),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionEvent {
    pub emotion: Emotion,
    pub timestamp: DateTime<Utc>,
}

/// One interview: a persona plus its full message and emotion history.
///
/// Sessions are stored as immutable snapshots; every mutation in the store
/// clones, modifies and replaces the snapshot under the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    pub persona: Persona,
    pub messages: Vec<Message>,
    pub current_emotion: Emotion,
    pub emotion_history: Vec<EmotionEvent>,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            persona: Persona::default(),
            messages: Vec::new(),
            current_emotion: Emotion::Neutral,
            emotion_history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn persona_message_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == MessageRole::Persona)
            .count()
    }

    /// Append a successfully generated reply and record its emotion.
    pub(crate) fn push_reply(&mut self, message: Message) {
        let emotion = message.emotion.unwrap_or_default();
        self.emotion_history.push(EmotionEvent {
            emotion,
            timestamp: message.timestamp,
        });
        self.current_emotion = emotion;
        self.messages.push(message);
    }
}
