use std::time::Duration;

use tokio::time::Instant;

use personachat::Emotion;
use personachat::session::{
    CONNECTION_INTERRUPTED_MESSAGE, MessageRole, QUOTA_EXCEEDED_MESSAGE, SubmitOutcome,
};

use crate::transport_harness::{Step, maya, store};

fn offsets(start: Instant, log: &crate::transport_harness::CallLog) -> Vec<Duration> {
    log.lock().unwrap().iter().map(|c| c.at - start).collect()
}

#[tokio::test(start_paused = true)]
async fn three_overload_failures_yield_one_synthetic_message() {
    let (store, log) = store([
        Step::Fail("503 Service Unavailable: model overloaded"),
        Step::Fail("503 Service Unavailable: model overloaded"),
        Step::Fail("503 Service Unavailable: model overloaded"),
    ]);
    let id = store.create_session();
    store.configure_persona(&id, maya());
    let start = Instant::now();

    let outcome = store.submit_message(&id, "hello?").await;

    assert_eq!(
        offsets(start, &log),
        vec![
            Duration::ZERO,
            Duration::from_millis(2_000),
            Duration::from_millis(6_000)
        ]
    );

    let SubmitOutcome::Failed(message) = outcome else {
        panic!("expected a failure, got {outcome:?}");
    };
    assert_eq!(message.content, CONNECTION_INTERRUPTED_MESSAGE);
    assert_eq!(message.emotion, Some(Emotion::Frustrated));

    let session = store.snapshot(&id).unwrap();
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[1].role, MessageRole::Persona);
    assert_eq!(session.persona_message_count(), 1);
    assert!(session.emotion_history.is_empty());
    assert_eq!(session.current_emotion, Emotion::Neutral);
    assert!(!store.is_loading(&id));
}

#[tokio::test(start_paused = true)]
async fn exhausted_quota_shows_quota_literal() {
    let (store, log) = store([
        Step::Fail("429 Too Many Requests"),
        Step::Fail("You exceeded your current quota"),
        Step::Fail("429 Too Many Requests"),
    ]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    let outcome = store.submit_message(&id, "hello?").await;

    assert_eq!(log.lock().unwrap().len(), 3);
    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(ref m) if m.content == QUOTA_EXCEEDED_MESSAGE
    ));
}

#[tokio::test(start_paused = true)]
async fn last_failure_decides_the_literal() {
    let (store, _) = store([
        Step::Fail("429 Too Many Requests"),
        Step::Fail("invalid argument"),
    ]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    let outcome = store.submit_message(&id, "hello?").await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(ref m) if m.content == CONNECTION_INTERRUPTED_MESSAGE
    ));
}

#[tokio::test(start_paused = true)]
async fn fatal_failure_is_not_retried() {
    let (store, log) = store([Step::Fail("API key not valid. Please pass a valid API key.")]);
    let id = store.create_session();
    store.configure_persona(&id, maya());
    let start = Instant::now();

    let outcome = store.submit_message(&id, "hello?").await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(offsets(start, &log), vec![Duration::ZERO]);
    assert_eq!(Instant::now(), start);
}

#[tokio::test(start_paused = true)]
async fn recovery_after_transient_failure_records_emotion() {
    let (store, log) = store([
        Step::Fail("The model is overloaded. Please try again later."),
        Step::Reply("Finally loaded. [IMPATIENT]"),
    ]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    let outcome = store.submit_message(&id, "hello?").await;

    assert!(matches!(outcome, SubmitOutcome::Replied(_)));
    assert_eq!(log.lock().unwrap().len(), 2);
    let session = store.snapshot(&id).unwrap();
    assert_eq!(session.emotion_history.len(), 1);
    assert_eq!(session.current_emotion, Emotion::Impatient);
}

#[tokio::test]
async fn failure_messages_stay_in_the_resent_history() {
    let (store, log) = store([
        Step::Fail("connection reset by peer"),
        Step::Reply("Sorry, where were we? [CONFUSED]"),
    ]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    store.submit_message(&id, "first").await;
    store.submit_message(&id, "second").await;

    let calls = log.lock().unwrap();
    let texts: Vec<&str> = calls[1]
        .request
        .turns
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec!["first", CONNECTION_INTERRUPTED_MESSAGE, "second"]
    );

    let session = store.snapshot(&id).unwrap();
    assert_eq!(session.persona_message_count(), 2);
    assert_eq!(session.emotion_history.len(), 1);
}

#[tokio::test]
async fn credential_is_read_for_every_attempt() {
    let (store, log) = store([Step::Reply("ok [NEUTRAL]"), Step::Reply("ok [NEUTRAL]")]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    store.submit_message(&id, "one").await;
    store.submit_message(&id, "two").await;

    let calls = log.lock().unwrap();
    assert!(calls.iter().all(|c| c.credential == "test-key"));
}
