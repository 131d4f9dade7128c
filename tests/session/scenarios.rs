use personachat::Emotion;
use personachat::llm::{EMPTY_REPLY_PLACEHOLDER, TurnRole};
use personachat::session::{MessageRole, SubmitOutcome};

use std::sync::Arc;

use crate::transport_harness::{Step, gated_store, maya, store};

#[tokio::test]
async fn slow_checkout_steers_toward_frustrated() {
    let (store, log) = store([Step::Reply("... [FRUSTRATED]")]);
    let id = store.create_session();
    assert!(store.configure_persona(&id, maya()));

    let outcome = store
        .submit_message(&id, "the checkout flow is so slow")
        .await;

    let calls = log.lock().unwrap();
    let instruction = &calls[0].request.system_instruction;
    assert!(instruction.contains("You are Maya, a Analyst"));
    assert!(instruction.contains("Let's focus on checkout flow."));
    assert!(instruction.contains("lean towards FRUSTRATED"));

    let SubmitOutcome::Replied(reply) = outcome else {
        panic!("expected a reply, got {outcome:?}");
    };
    assert_eq!(reply.content, "...");
    assert_eq!(reply.emotion, Some(Emotion::Frustrated));

    let session = store.snapshot(&id).unwrap();
    assert_eq!(session.current_emotion, Emotion::Frustrated);
    assert_eq!(session.emotion_history.len(), 1);
}

#[tokio::test]
async fn neutral_text_gets_no_tone_hint() {
    let (store, log) = store([Step::Reply("Sure. [NEUTRAL]")]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    store.submit_message(&id, "walk me through it").await;

    let calls = log.lock().unwrap();
    assert!(!calls[0].request.system_instruction.contains("lean towards"));
}

#[tokio::test]
async fn last_tag_wins_and_all_tags_are_stripped() {
    let (store, _) = store([Step::Reply("[HAPPY] I liked the start, the end not so much. [BORED]")]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    let SubmitOutcome::Replied(reply) = store.submit_message(&id, "thoughts?").await else {
        panic!("expected a reply");
    };

    assert_eq!(reply.content, "I liked the start, the end not so much.");
    assert_eq!(reply.emotion, Some(Emotion::Bored));
}

#[tokio::test]
async fn untagged_and_empty_replies_are_neutral() {
    let (store, _) = store([Step::Reply("No tag at all."), Step::NoText]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    let SubmitOutcome::Replied(first) = store.submit_message(&id, "one").await else {
        panic!("expected a reply");
    };
    let SubmitOutcome::Replied(second) = store.submit_message(&id, "two").await else {
        panic!("expected a reply");
    };

    assert_eq!(first.content, "No tag at all.");
    assert_eq!(first.emotion, Some(Emotion::Neutral));
    assert_eq!(
        second.content,
        EMPTY_REPLY_PLACEHOLDER.trim_end_matches(" [NEUTRAL]")
    );
    assert_eq!(second.emotion, Some(Emotion::Neutral));
}

#[tokio::test]
async fn full_history_is_resent_oldest_first() {
    let (store, log) = store([
        Step::Reply("Checkout is fine. [NEUTRAL]"),
        Step::Reply("Payment was slow. [IMPATIENT]"),
        Step::Reply("Sure. [HAPPY]"),
    ]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    store.submit_message(&id, "first").await;
    store.submit_message(&id, "second").await;
    store.submit_message(&id, "third").await;

    let calls = log.lock().unwrap();
    let turns = &calls[2].request.turns;
    let texts: Vec<&str> = turns.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "first",
            "Checkout is fine.",
            "second",
            "Payment was slow.",
            "third"
        ]
    );
    assert_eq!(turns[1].role, TurnRole::Model);
    assert_eq!(turns[4].role, TurnRole::User);
    assert!(calls.iter().all(|c| c.request.model == "gemini-test"));
}

#[tokio::test]
async fn timeline_invariants_hold_across_a_conversation() {
    let (store, _) = store([
        Step::Reply("Hi. [NEUTRAL]"),
        Step::Reply("Oh nice! [EXCITED]"),
        Step::Reply("Hmm? [CONFUSED]"),
    ]);
    let id = store.create_session();
    store.configure_persona(&id, maya());

    for text in ["hello", "we made it faster", "what about the cart?"] {
        store.submit_message(&id, text).await;
        let session = store.snapshot(&id).unwrap();
        assert_eq!(
            session.emotion_history.len(),
            session.persona_message_count()
        );
        assert_eq!(
            Some(session.current_emotion),
            session.emotion_history.last().map(|e| e.emotion)
        );
    }

    let session = store.snapshot(&id).unwrap();
    let roles: Vec<MessageRole> = session.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        [MessageRole::Researcher, MessageRole::Persona].repeat(3)
    );
    assert!(session.messages[0].emotion.is_none());
}

#[tokio::test]
async fn researcher_message_is_visible_while_loading() {
    let (store, release) = gated_store("ok [NEUTRAL]");
    let store = Arc::new(store);
    let id = store.create_session();
    store.configure_persona(&id, maya());
    let mut revisions = store.subscribe();

    let task = {
        let store = Arc::clone(&store);
        let id = id.clone();
        tokio::spawn(async move { store.submit_message(&id, "are you there?").await })
    };

    revisions.changed().await.unwrap();

    assert!(store.is_loading(&id));
    let pending = store.snapshot(&id).unwrap();
    assert_eq!(pending.messages.len(), 1);
    assert_eq!(pending.messages[0].role, MessageRole::Researcher);
    assert_eq!(pending.messages[0].content, "are you there?");
    assert!(pending.emotion_history.is_empty());

    release.notify_one();
    let outcome = task.await.unwrap();

    assert!(matches!(outcome, SubmitOutcome::Replied(_)));
    assert!(!store.is_loading(&id));
    let session = store.snapshot(&id).unwrap();
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[1].role, MessageRole::Persona);
}
