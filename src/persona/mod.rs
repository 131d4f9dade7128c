pub mod emotion;
pub mod tags;

pub use emotion::Emotion;
pub use tags::{ParsedReply, contains_emotion_tag, parse_emotion_tag};
