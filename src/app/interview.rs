//! Line-oriented interview loop on top of [`SessionStore`].

use crate::persona::Emotion;
use crate::report::ReportGenerator;
use crate::session::{PersonaFields, SessionId, SessionStore, SubmitOutcome};
use crate::ui::style as ui;
use crate::utils::truncate_with_ellipsis;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Say(String),
    Report,
    Mood,
    Help,
    Quit,
    Blank,
    Unknown(String),
}

pub fn parse_input(line: &str) -> InputAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputAction::Blank;
    }

    match trimmed.strip_prefix('/') {
        Some(command) => match command.to_ascii_lowercase().as_str() {
            "report" => InputAction::Report,
            "mood" => InputAction::Mood,
            "help" => InputAction::Help,
            "quit" | "exit" => InputAction::Quit,
            _ => InputAction::Unknown(trimmed.to_string()),
        },
        None => InputAction::Say(trimmed.to_string()),
    }
}

/// Compact one-glyph-per-event view of the emotion timeline.
pub fn mood_trail(emotions: impl IntoIterator<Item = Emotion>) -> String {
    emotions
        .into_iter()
        .map(|emotion| match emotion.chart_value() {
            v if v >= 1.0 => '▲',
            v if v >= 0.5 => '●',
            v if v > 0.0 => '▽',
            _ => '▼',
        })
        .collect()
}

pub struct Interview {
    store: Arc<SessionStore>,
    reports: ReportGenerator,
    report_dir: PathBuf,
    session_id: SessionId,
}

impl Interview {
    /// Create and configure a new session for `fields`.
    pub fn start(
        store: Arc<SessionStore>,
        reports: ReportGenerator,
        report_dir: PathBuf,
        fields: PersonaFields,
    ) -> Self {
        let session_id = store.create_session();
        store.configure_persona(&session_id, fields);
        Self {
            store,
            reports,
            report_dir,
            session_id,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Read researcher lines from `input` until `/quit` or end of input.
    ///
    /// Lines typed while a reply is pending are rejected. On exit the pending
    /// reply, if any, is awaited so the transcript stays complete.
    pub async fn run<R: AsyncBufRead + Unpin>(&self, input: R) -> Result<()> {
        let mut lines = input.lines();
        let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();
        let mut pending = false;

        self.print_banner();

        loop {
            tokio::select! {
                Some(outcome) = outcomes.recv() => {
                    pending = false;
                    self.print_outcome(&outcome);
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    match parse_input(&line) {
                        InputAction::Quit => break,
                        InputAction::Blank => {}
                        InputAction::Help => print_help(),
                        InputAction::Mood => self.print_mood(),
                        InputAction::Report => self.export_report(),
                        InputAction::Unknown(command) => {
                            println!("{}", ui::yellow(format!("Unknown command {command}; try /help")));
                        }
                        InputAction::Say(text) => {
                            if pending || self.store.is_loading(&self.session_id) {
                                println!("{}", ui::dim("Still waiting for the persona to answer..."));
                                continue;
                            }
                            tracing::debug!(preview = %truncate_with_ellipsis(&text, 60), "Submitting");
                            pending = true;
                            let store = Arc::clone(&self.store);
                            let id = self.session_id.clone();
                            let tx = outcome_tx.clone();
                            tokio::spawn(async move {
                                let outcome = store.submit_message(&id, &text).await;
                                let _ = tx.send(outcome);
                            });
                        }
                    }
                }
            }
        }

        if pending {
            println!("{}", ui::dim("Waiting for the pending reply..."));
            if let Some(outcome) = outcomes.recv().await {
                self.print_outcome(&outcome);
            }
        }
        Ok(())
    }

    fn persona_label(&self) -> String {
        self.store
            .snapshot(&self.session_id)
            .map(|s| s.persona.name.to_uppercase())
            .unwrap_or_default()
    }

    fn print_banner(&self) {
        if let Some(session) = self.store.snapshot(&self.session_id) {
            let persona = &session.persona;
            println!();
            println!(
                "  {} {}",
                ui::accent("◆"),
                ui::header(format!("Interviewing {} ({})", persona.name, persona.role))
            );
            println!("  {}", ui::dim(format!("Scope: {}", persona.scope)));
            println!(
                "  {}",
                ui::dim("Type a question, or /mood, /report, /help, /quit")
            );
            println!();
        }
    }

    fn print_outcome(&self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Replied(message) => {
                let emotion = message.emotion.unwrap_or_default();
                println!(
                    "{} {} {}",
                    ui::header(format!("{}:", self.persona_label())),
                    ui::emotion(emotion),
                    message.content
                );
            }
            SubmitOutcome::Failed(message) => {
                println!("{}", ui::yellow(&message.content));
            }
            SubmitOutcome::Ignored => {}
        }
    }

    fn print_mood(&self) {
        let Some(session) = self.store.snapshot(&self.session_id) else {
            return;
        };
        let trail = mood_trail(session.emotion_history.iter().map(|e| e.emotion));
        println!(
            "Current mood {} after {} replies {}",
            ui::emotion(session.current_emotion),
            session.emotion_history.len(),
            ui::dim(trail)
        );
    }

    fn export_report(&self) {
        let Some(session) = self.store.snapshot(&self.session_id) else {
            return;
        };
        match self.reports.write_to(&self.report_dir, &session) {
            Ok(path) => println!("Report saved to {}", ui::value(path.display())),
            Err(e) => {
                tracing::error!("Report export failed: {e}");
                println!("{}", ui::yellow(format!("Report export failed: {e}")));
            }
        }
    }
}

fn print_help() {
    println!("  /mood    show the persona's current emotion and trail");
    println!("  /report  export the session report");
    println!("  /quit    end the interview");
}
