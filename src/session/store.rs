use super::types::{
    ChatSession, DEFAULT_SESSION_TITLE, Message, Persona, PersonaFields, SessionId,
};
use crate::llm::{FailureClass, GenerationClient, classify_failure};
use crate::persona::{Emotion, parse_emotion_tag};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

pub const QUOTA_EXCEEDED_MESSAGE: &str = "⚠️ API Quota Exceeded. Please check your billing or wait a few minutes for the rate limit to reset.";
pub const CONNECTION_INTERRUPTED_MESSAGE: &str = "⚠️ Connection interrupted. Please try again.";

/// Result of [`SessionStore::submit_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank text, unknown session or unconfigured persona; nothing changed.
    Ignored,
    /// The persona answered; its emotion was appended to the timeline.
    Replied(Message),
    /// Generation failed; a synthetic FRUSTRATED message was appended
    /// without an emotion event.
    Failed(Message),
}

/// User-visible text for a failed generation.
pub fn failure_message(err: &anyhow::Error) -> &'static str {
    match classify_failure(err) {
        FailureClass::RateLimited => QUOTA_EXCEEDED_MESSAGE,
        FailureClass::Overloaded | FailureClass::Fatal => CONNECTION_INTERRUPTED_MESSAGE,
    }
}

#[derive(Default)]
struct StoreState {
    sessions: HashMap<SessionId, Arc<ChatSession>>,
    /// Newest first.
    order: Vec<SessionId>,
    active: Option<SessionId>,
    loading: HashSet<SessionId>,
}

impl StoreState {
    /// Clone the stored snapshot, apply `update`, and store the result.
    fn replace(&mut self, id: &str, update: impl FnOnce(&mut ChatSession)) -> bool {
        let Some(current) = self.sessions.get(id) else {
            return false;
        };
        let mut next = ChatSession::clone(current);
        update(&mut next);
        self.sessions.insert(id.to_string(), Arc::new(next));
        true
    }
}

/// In-memory owner of every interview session.
///
/// Sessions are immutable snapshots keyed by id; each mutation replaces the
/// snapshot while the lock is held. The lock is never held across the
/// generation call, so other sessions stay usable while one awaits a reply.
pub struct SessionStore {
    client: GenerationClient,
    state: Mutex<StoreState>,
    revision: watch::Sender<u64>,
}

impl SessionStore {
    pub fn new(client: GenerationClient) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            client,
            state: Mutex::new(StoreState::default()),
            revision,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Receiver whose value increases on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn create_session(&self) -> SessionId {
        let session = ChatSession::new();
        let id = session.id.clone();
        {
            let mut state = self.lock();
            state.sessions.insert(id.clone(), Arc::new(session));
            state.order.insert(0, id.clone());
            state.active = Some(id.clone());
        }
        self.bump();
        tracing::debug!(session_id = %id, "Created session");
        id
    }

    /// Configure the persona of a fresh session. Returns `false` when the id
    /// is unknown or the persona was already configured.
    pub fn configure_persona(&self, id: &str, fields: PersonaFields) -> bool {
        let configured = {
            let mut state = self.lock();
            let already = state
                .sessions
                .get(id)
                .is_some_and(|s| s.persona.is_initialized);
            !already
                && state.replace(id, |session| {
                    session.title = if fields.name.trim().is_empty() {
                        DEFAULT_SESSION_TITLE.to_string()
                    } else {
                        fields.name.clone()
                    };
                    session.persona = Persona::from_fields(fields);
                })
        };

        if configured {
            self.bump();
            tracing::info!(session_id = %id, "Persona configured");
        } else {
            tracing::warn!(session_id = %id, "Ignoring persona configuration");
        }
        configured
    }

    /// Append `text` as a researcher message and wait for the persona's reply.
    ///
    /// The researcher message is visible before the generation call starts.
    /// Callers should not submit again while [`is_loading`](Self::is_loading)
    /// is true for the same session.
    pub async fn submit_message(&self, id: &str, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        let (persona, history) = {
            let mut state = self.lock();
            let Some(current) = state.sessions.get(id) else {
                tracing::debug!(session_id = %id, "Submit to unknown session ignored");
                return SubmitOutcome::Ignored;
            };
            if !current.persona.is_initialized {
                tracing::debug!(session_id = %id, "Submit before persona configuration ignored");
                return SubmitOutcome::Ignored;
            }
            let persona = current.persona.clone();
            let history = current.messages.clone();

            state.replace(id, |session| session.messages.push(Message::researcher(text)));
            state.loading.insert(id.to_string());
            (persona, history)
        };
        self.bump();

        let result = self.client.generate(&persona, &history, text).await;

        let (message, outcome) = match result {
            Ok(raw) => {
                let parsed = parse_emotion_tag(&raw);
                tracing::info!(session_id = %id, emotion = %parsed.emotion, "Persona replied");
                let message = Message::persona(parsed.text, parsed.emotion);
                (message.clone(), SubmitOutcome::Replied(message))
            }
            Err(err) => {
                tracing::warn!(session_id = %id, "Generation failed: {err:#}");
                let message = Message::persona(failure_message(&err), Emotion::Frustrated);
                (message.clone(), SubmitOutcome::Failed(message))
            }
        };

        {
            let mut state = self.lock();
            state.loading.remove(id);
            let replied = matches!(outcome, SubmitOutcome::Replied(_));
            let stored = state.replace(id, |session| {
                if replied {
                    session.push_reply(message);
                } else {
                    session.messages.push(message);
                }
            });
            if !stored {
                tracing::debug!(session_id = %id, "Session removed while waiting for reply");
            }
        }
        self.bump();

        outcome
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.lock().loading.contains(id)
    }

    pub fn snapshot(&self, id: &str) -> Option<Arc<ChatSession>> {
        self.lock().sessions.get(id).cloned()
    }

    /// All sessions, newest first.
    pub fn sessions(&self) -> Vec<Arc<ChatSession>> {
        let state = self.lock();
        state
            .order
            .iter()
            .filter_map(|id| state.sessions.get(id).cloned())
            .collect()
    }

    pub fn active_session_id(&self) -> Option<SessionId> {
        self.lock().active.clone()
    }

    pub fn active_session(&self) -> Option<Arc<ChatSession>> {
        let state = self.lock();
        state
            .active
            .as_ref()
            .and_then(|id| state.sessions.get(id).cloned())
    }

    pub fn set_active(&self, id: &str) -> bool {
        let changed = {
            let mut state = self.lock();
            if state.sessions.contains_key(id) {
                state.active = Some(id.to_string());
                true
            } else {
                false
            }
        };
        if changed {
            self.bump();
        }
        changed
    }

    /// Remove a session. When it was active, the newest remaining session
    /// becomes active.
    pub fn remove_session(&self, id: &str) -> bool {
        let removed = {
            let mut state = self.lock();
            if state.sessions.remove(id).is_some() {
                state.order.retain(|existing| existing != id);
                state.loading.remove(id);
                if state.active.as_deref() == Some(id) {
                    state.active = state.order.first().cloned();
                }
                true
            } else {
                false
            }
        };
        if removed {
            self.bump();
            tracing::debug!(session_id = %id, "Removed session");
        }
        removed
    }
}
