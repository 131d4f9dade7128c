use chrono::{TimeZone, Utc};

use personachat::Emotion;
use personachat::report::chart::{INSUFFICIENT_DATA, SEGMENT_WIDTH};
use personachat::report::layout::{PAGE_HEIGHT, PAGE_WIDTH, palette};
use personachat::report::{DrawOp, ReportDocument, ReportGenerator, report_filename};
use personachat::session::{ChatSession, EmotionEvent, Message, Persona};

fn session(name: &str) -> ChatSession {
    let mut session = ChatSession::new();
    session.title = name.to_string();
    session.persona = Persona {
        name: name.into(),
        role: "UX Lead".into(),
        traits: "skeptical, thorough".into(),
        scope: "account settings".into(),
        is_initialized: true,
    };
    session
}

fn with_exchanges(mut session: ChatSession, emotions: &[Emotion], content: &str) -> ChatSession {
    for &emotion in emotions {
        session.messages.push(Message::researcher(content));
        let reply = Message::persona(content, emotion);
        session.emotion_history.push(EmotionEvent {
            emotion,
            timestamp: reply.timestamp,
        });
        session.current_emotion = emotion;
        session.messages.push(reply);
    }
    session
}

fn layout(session: &ChatSession) -> ReportDocument {
    ReportGenerator::layout(session, Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
}

fn segments(doc: &ReportDocument) -> usize {
    doc.ops()
        .filter(|op| {
            matches!(op, DrawOp::Line { width, color, .. }
                if (*width - SEGMENT_WIDTH).abs() < f64::EPSILON && *color == palette::ACCENT)
        })
        .count()
}

#[test]
fn empty_session_renders_placeholder_and_empty_transcript() {
    let session = session("Dr. Lee");
    let doc = layout(&session);
    let texts: Vec<&str> = doc.texts().collect();

    assert!(texts.contains(&INSUFFICIENT_DATA));
    assert_eq!(segments(&doc), 0);
    assert_eq!(texts.last(), Some(&"Simulation Transcript"));
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(report_filename(&session.persona.name), "PersonaChat-Report-Dr.-Lee.html");
}

#[test]
fn single_event_still_renders_placeholder() {
    let doc = layout(&with_exchanges(session("Maya"), &[Emotion::Happy], "Nice."));
    assert!(doc.texts().any(|t| t == INSUFFICIENT_DATA));
    assert_eq!(segments(&doc), 0);
}

#[test]
fn chart_draws_n_minus_one_segments() {
    let emotions = [
        Emotion::Neutral,
        Emotion::Confused,
        Emotion::Frustrated,
        Emotion::Angry,
        Emotion::Excited,
    ];
    let doc = layout(&with_exchanges(session("Maya"), &emotions, "ok"));

    assert_eq!(segments(&doc), emotions.len() - 1);
    assert!(!doc.texts().any(|t| t == INSUFFICIENT_DATA));
    let dots = doc.ops().filter(|op| matches!(op, DrawOp::Dot { .. })).count();
    assert_eq!(dots, emotions.len());
}

#[test]
fn long_transcript_paginates_within_page_bounds() {
    let content = "The settings page hides the option I need behind three menus. ".repeat(6);
    let emotions = vec![Emotion::Impatient; 25];
    let doc = layout(&with_exchanges(session("Maya"), &emotions, &content));

    assert!(doc.pages.len() > 2);
    for page in &doc.pages {
        assert!(matches!(
            page.ops.first(),
            Some(DrawOp::FillRect { x, y, width, height, color })
                if *x == 0.0 && *y == 0.0 && *width == PAGE_WIDTH && *height == PAGE_HEIGHT
                    && *color == palette::BACKGROUND
        ));
        for op in &page.ops {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y <= PAGE_HEIGHT - 10.0, "text at y={y} runs off the page");
            }
        }
    }
}

#[test]
fn every_message_appears_in_order() {
    let session = with_exchanges(
        session("Maya"),
        &[Emotion::Bored, Emotion::Happy],
        "unique-line",
    );
    let doc = layout(&session);
    let labels: Vec<&str> = doc
        .texts()
        .filter(|t| t.ends_with(':'))
        .collect();

    assert_eq!(
        labels,
        vec![
            "RESEARCHER:",
            "MAYA (BORED):",
            "RESEARCHER:",
            "MAYA (HAPPY):"
        ]
    );
}

#[test]
fn html_output_has_one_svg_per_page() {
    let content = "word ".repeat(80);
    let session = with_exchanges(session("Maya"), &vec![Emotion::Neutral; 30], &content);
    let doc = layout(&session);
    let html = ReportGenerator::new()
        .unwrap()
        .render_html(&session, Utc::now())
        .unwrap();

    assert_eq!(html.matches("<svg ").count(), doc.pages.len());
}
