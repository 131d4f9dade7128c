//! Emotion tags embedded in generated replies.
//!
//! The model is instructed to end every reply with one bracketed marker such
//! as `[HAPPY]`. Models sometimes drop a tag mid-sentence before the real one,
//! so the last tag in the text wins and every recognised tag is stripped from
//! what the researcher sees.

use super::emotion::Emotion;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static EMOTION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i-u)\[(NEUTRAL|HAPPY|ANGRY|FRUSTRATED|CONFUSED|EXCITED|BORED|IMPATIENT)\]")
        .expect("emotion tag pattern is valid")
});

/// Display text with its emotion tags removed, plus the emotion they carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub text: String,
    pub emotion: Emotion,
}

/// Split a generated reply into display text and its final emotion tag.
///
/// Never fails: text without a recognised tag is returned trimmed with
/// [`Emotion::Neutral`].
pub fn parse_emotion_tag(text: &str) -> ParsedReply {
    let emotion = EMOTION_TAG
        .captures_iter(text)
        .last()
        .and_then(|caps| Emotion::from_str(&caps[1]).ok())
        .unwrap_or_default();

    let stripped = EMOTION_TAG.replace_all(text, "");

    ParsedReply {
        text: stripped.trim().to_string(),
        emotion,
    }
}

/// Whether the text carries at least one recognised emotion tag.
pub fn contains_emotion_tag(text: &str) -> bool {
    EMOTION_TAG.is_match(text)
}
