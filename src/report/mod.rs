//! Session report: persona profile, emotional journey chart and transcript,
//! laid out on fixed-size pages in a single forward pass.

pub mod chart;
pub mod layout;
mod render;

pub use layout::{DrawOp, Page, ReportDocument, Rgb};

use crate::error::ReportError;
use crate::prompt::TemplateEngine;
use crate::session::{ChatSession, MessageRole};
use crate::utils::wrap_text;
use chrono::{DateTime, Utc};
use layout::{MARGIN_LEFT, PageWriter, palette};
use std::path::{Path, PathBuf};

pub const REPORT_TITLE: &str = "PersonaChat: Research Insights";
const PROFILE_TITLE: &str = "Persona Profile";
const TRANSCRIPT_TITLE: &str = "Simulation Transcript";

const CONTENT_START: f64 = 55.0;
const WRAP_WIDTH: usize = 90;
const HEADING_SIZE: f64 = 16.0;
const TRANSCRIPT_INDENT: f64 = 25.0;

// Page-break thresholds: a block starts on a new page when the cursor is
// already past its threshold.
const FIELD_TITLE_BREAK: f64 = 270.0;
const FIELD_LINE_BREAK: f64 = 280.0;
const CHART_BREAK: f64 = 220.0;
const TRANSCRIPT_HEADER_BREAK: f64 = 260.0;
const TRANSCRIPT_ENTRY_BREAK: f64 = 270.0;
const TRANSCRIPT_LINE_BREAK: f64 = 285.0;

const RESERVED_FILENAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Deterministic report file name for a persona.
///
/// Path separators and other characters reserved by common filesystems are
/// treated like whitespace, so the result is always a single path component.
pub fn report_filename(persona_name: &str) -> String {
    let slug = persona_name
        .split(|c: char| c.is_whitespace() || c.is_control() || RESERVED_FILENAME_CHARS.contains(&c))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { "Session" } else { &slug };
    format!("PersonaChat-Report-{slug}.html")
}

pub struct ReportGenerator {
    engine: TemplateEngine,
}

impl ReportGenerator {
    pub fn new() -> anyhow::Result<Self> {
        let engine = TemplateEngine::with_templates(&[(render::TEMPLATE_NAME, render::TEMPLATE)])?;
        Ok(Self { engine })
    }

    /// Lay out `session` into pages.
    pub fn layout(session: &ChatSession, generated_at: DateTime<Utc>) -> ReportDocument {
        let mut writer = PageWriter::new(CONTENT_START);

        write_header(&mut writer, generated_at);
        write_profile(&mut writer, session);

        writer.break_if_past(CHART_BREAK);
        chart::draw(&mut writer, &session.emotion_history, HEADING_SIZE);

        write_transcript(&mut writer, session);
        writer.finish()
    }

    pub fn render_html(
        &self,
        session: &ChatSession,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ReportError> {
        let document = Self::layout(session, generated_at);
        let title = format!("{REPORT_TITLE} - {}", session.title);
        render::render_html(&self.engine, &title, &document)
            .map_err(|e| ReportError::Render(format!("{e:#}")))
    }

    /// Render `session` and write it into `dir` under [`report_filename`].
    pub fn write_to(&self, dir: &Path, session: &ChatSession) -> Result<PathBuf, ReportError> {
        let html = self.render_html(session, Utc::now())?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(report_filename(&session.persona.name));
        std::fs::write(&path, html)?;
        tracing::info!(path = %path.display(), session_id = %session.id, "Report written");
        Ok(path)
    }
}

fn write_header(writer: &mut PageWriter, generated_at: DateTime<Utc>) {
    writer.text(MARGIN_LEFT, 30.0, REPORT_TITLE, 24.0, palette::TITLE);
    writer.text(
        MARGIN_LEFT,
        38.0,
        format!("Generated on {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        10.0,
        palette::MUTED,
    );
    writer.line((MARGIN_LEFT, 42.0), (190.0, 42.0), 0.5, palette::ACCENT);
}

fn write_profile(writer: &mut PageWriter, session: &ChatSession) {
    writer.text_here(PROFILE_TITLE, HEADING_SIZE, palette::ACCENT);
    writer.advance(10.0);

    let persona = &session.persona;
    for (title, value) in [
        ("Name", &persona.name),
        ("Role", &persona.role),
        ("Behavioral Traits", &persona.traits),
        ("Simulation Scope", &persona.scope),
    ] {
        writer.break_if_past(FIELD_TITLE_BREAK);
        writer.text_here(title, 11.0, palette::ACCENT);
        writer.advance(7.0);

        for line in wrap_text(value, WRAP_WIDTH) {
            writer.break_if_past(FIELD_LINE_BREAK);
            writer.text_here(line, 11.0, palette::BODY);
            writer.advance(6.0);
        }
        writer.advance(4.0);
    }
}

fn write_transcript(writer: &mut PageWriter, session: &ChatSession) {
    writer.break_if_past(TRANSCRIPT_HEADER_BREAK);
    writer.text_here(TRANSCRIPT_TITLE, HEADING_SIZE, palette::ACCENT);
    writer.advance(10.0);

    let persona_label = session.persona.name.to_uppercase();
    for message in &session.messages {
        writer.break_if_past(TRANSCRIPT_ENTRY_BREAK);

        let speaker = match message.role {
            MessageRole::Researcher => "RESEARCHER",
            MessageRole::Persona => persona_label.as_str(),
        };
        let label = match message.emotion {
            Some(emotion) => format!("{speaker} ({emotion}):"),
            None => format!("{speaker}:"),
        };
        writer.text_here(label, 9.0, palette::MUTED);
        writer.advance(6.0);

        for line in wrap_text(&message.content, WRAP_WIDTH) {
            writer.break_if_past(TRANSCRIPT_LINE_BREAK);
            let y = writer.y();
            writer.text(TRANSCRIPT_INDENT, y, line, 10.0, palette::TRANSCRIPT);
            writer.advance(5.0);
        }
        writer.advance(3.0);
    }
}
