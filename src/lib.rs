#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod persona;
pub mod prompt;
pub mod report;
pub mod session;
#[doc(hidden)]
pub mod ui;
pub mod utils;


pub use config::Config;
pub use error::{PersonaChatError, Result};
pub use llm::{CredentialSource, GenerationClient, GenerationTransport};
pub use persona::{Emotion, parse_emotion_tag};
pub use report::{ReportGenerator, report_filename};
pub use session::{SessionStore, SubmitOutcome};
