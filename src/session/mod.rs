pub mod store;
pub mod types;

pub use store::{
    CONNECTION_INTERRUPTED_MESSAGE, QUOTA_EXCEEDED_MESSAGE, SessionStore, SubmitOutcome,
    failure_message,
};
pub use types::{
    ChatSession, DEFAULT_SESSION_TITLE, EmotionEvent, Message, MessageRole, Persona,
    PersonaFields, SessionId,
};
