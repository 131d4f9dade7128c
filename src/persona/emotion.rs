use serde::{Deserialize, Serialize};

/// Affect the simulated persona reports about itself at the end of each reply.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Angry,
    Frustrated,
    Confused,
    Excited,
    Bored,
    Impatient,
}

impl Emotion {
    /// Every emotion, ordered from most to least positive.
    pub const ALL: [Emotion; 8] = [
        Emotion::Happy,
        Emotion::Excited,
        Emotion::Neutral,
        Emotion::Bored,
        Emotion::Confused,
        Emotion::Impatient,
        Emotion::Frustrated,
        Emotion::Angry,
    ];

    /// Position on the report chart's ordinal scale, in `[0.0, 1.0]`.
    pub fn chart_value(self) -> f64 {
        match self {
            Emotion::Happy | Emotion::Excited => 1.0,
            Emotion::Neutral => 0.5,
            Emotion::Bored => 0.4,
            Emotion::Confused => 0.3,
            Emotion::Impatient => 0.2,
            Emotion::Frustrated | Emotion::Angry => 0.0,
        }
    }

    /// The bracketed marker the model is told to end its replies with.
    pub fn tag(self) -> String {
        format!("[{self}]")
    }
}
