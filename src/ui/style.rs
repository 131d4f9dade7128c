use crate::persona::Emotion;
use console::style;
use std::fmt::Display;

/// White bold: section headers, persona names
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: hints, secondary text
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: warnings, failed replies
pub fn yellow<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Green: paths, confirmed values
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold: prompts, researcher label
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Emotion label colored by valence.
pub fn emotion(emotion: Emotion) -> String {
    let label = style(format!("[{emotion}]"));
    match emotion {
        Emotion::Happy | Emotion::Excited => label.green(),
        Emotion::Neutral => label.dim(),
        Emotion::Bored | Emotion::Confused | Emotion::Impatient => label.yellow(),
        Emotion::Frustrated | Emotion::Angry => label.red(),
    }
    .to_string()
}
