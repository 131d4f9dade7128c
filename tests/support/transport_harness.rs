#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use tokio::time::Instant;

use personachat::config::{GenerationConfig, ReliabilityConfig};
use personachat::llm::{GenerationClient, GenerationRequest, GenerationResponse, GenerationTransport};
use personachat::session::{PersonaFields, SessionStore};

/// One scripted transport outcome.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Reply(&'static str),
    NoText,
    Fail(&'static str),
}

#[derive(Debug, Clone)]
pub struct Call {
    pub at: Instant,
    pub credential: String,
    pub request: GenerationRequest,
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub struct ScriptedTransport {
    script: Mutex<VecDeque<Step>>,
    log: CallLog,
}

impl ScriptedTransport {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> (Self, CallLog) {
        let log = CallLog::default();
        let transport = Self {
            script: Mutex::new(steps.into_iter().collect()),
            log: Arc::clone(&log),
        };
        (transport, log)
    }
}

impl GenerationTransport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate<'a>(
        &'a self,
        credential: &'a str,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<GenerationResponse>> + Send + 'a>> {
        Box::pin(async move {
            self.log.lock().unwrap().push(Call {
                at: Instant::now(),
                credential: credential.to_string(),
                request: request.clone(),
            });
            let step = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .expect("transport called more often than scripted");
            match step {
                Step::Reply(text) => Ok(GenerationResponse::text(text)),
                Step::NoText => Ok(GenerationResponse::default()),
                Step::Fail(message) => Err(anyhow::anyhow!(message)),
            }
        })
    }
}

/// Replies with a fixed text once `release` is notified.
pub struct GatedTransport {
    reply: &'static str,
    release: Arc<Notify>,
}

impl GenerationTransport for GatedTransport {
    fn name(&self) -> &str {
        "gated"
    }

    fn generate<'a>(
        &'a self,
        _credential: &'a str,
        _request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<GenerationResponse>> + Send + 'a>> {
        Box::pin(async move {
            self.release.notified().await;
            Ok(GenerationResponse::text(self.reply))
        })
    }
}

fn client_over(transport: impl GenerationTransport + 'static) -> GenerationClient {
    GenerationClient::new(
        Box::new(transport),
        Arc::new(|| "test-key".to_string()),
        "gemini-test",
        GenerationConfig::default(),
        ReliabilityConfig::default(),
    )
    .expect("client")
}

pub fn client(steps: impl IntoIterator<Item = Step>) -> (GenerationClient, CallLog) {
    let (transport, log) = ScriptedTransport::new(steps);
    (client_over(transport), log)
}

pub fn store(steps: impl IntoIterator<Item = Step>) -> (SessionStore, CallLog) {
    let (client, log) = client(steps);
    (SessionStore::new(client), log)
}

/// Store whose single reply is held back until the returned handle is notified.
pub fn gated_store(reply: &'static str) -> (SessionStore, Arc<Notify>) {
    let release = Arc::new(Notify::new());
    let transport = GatedTransport {
        reply,
        release: Arc::clone(&release),
    };
    (SessionStore::new(client_over(transport)), release)
}

pub fn maya() -> PersonaFields {
    PersonaFields {
        name: "Maya".into(),
        role: "Analyst".into(),
        traits: "impatient".into(),
        scope: "checkout flow".into(),
    }
}
