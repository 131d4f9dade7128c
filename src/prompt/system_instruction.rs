//! System instruction sent with every generation request.

use super::engine::TemplateEngine;
use crate::error::LlmError;
use crate::persona::Emotion;
use crate::session::types::Persona;
use serde::Serialize;

const TEMPLATE_NAME: &str = "system_instruction.txt";

const TEMPLATE: &str = r#"You are {{ name }}, a {{ role }}. Traits: {{ traits }}. Simulation Scope: {{ scope }}.

RULES:
1. Stay deeply in character.
2. If the researcher asks about unrelated topics (weather, sports, politics), refuse to answer: "That's not what I'm here to talk about. Let's focus on {{ scope }}."
3. If specific UX feedback is requested, be highly opinionated based on your traits.
4. EMOTION TAGGING: You MUST end every single message with exactly one of: {{ tags }}.
{% if hint %}
The researcher just described something {{ hint.trigger }}, so you should lean towards {{ hint.emotion }}.
{% endif %}"#;

/// Tone nudge derived from keywords in the researcher's latest message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToneHint {
    /// The keyword that triggered the hint.
    pub trigger: &'static str,
    pub emotion: Emotion,
}

/// Keyword heuristic, checked in order; negative words win over positive ones.
pub fn tone_hint(user_text: &str) -> Option<ToneHint> {
    const RULES: [(&str, Emotion); 4] = [
        ("slow", Emotion::Frustrated),
        ("bad", Emotion::Frustrated),
        ("fast", Emotion::Happy),
        ("good", Emotion::Happy),
    ];

    let lower = user_text.to_lowercase();
    RULES
        .iter()
        .find(|(word, _)| lower.contains(word))
        .map(|&(trigger, emotion)| ToneHint { trigger, emotion })
}

#[derive(Serialize)]
struct InstructionContext<'a> {
    name: &'a str,
    role: &'a str,
    traits: &'a str,
    scope: &'a str,
    tags: String,
    hint: Option<ToneHint>,
}

pub struct SystemInstructionBuilder {
    engine: TemplateEngine,
}

impl SystemInstructionBuilder {
    pub fn new() -> anyhow::Result<Self> {
        let engine = TemplateEngine::with_templates(&[(TEMPLATE_NAME, TEMPLATE)])?;
        Ok(Self { engine })
    }

    /// Render the instruction for `persona`, biased by the just-submitted text.
    pub fn build(&self, persona: &Persona, user_text: &str) -> Result<String, LlmError> {
        let tags = Emotion::ALL
            .iter()
            .map(|e| e.tag())
            .collect::<Vec<_>>()
            .join(", ");

        let context = InstructionContext {
            name: &persona.name,
            role: &persona.role,
            traits: &persona.traits,
            scope: &persona.scope,
            tags,
            hint: tone_hint(user_text),
        };

        self.engine
            .render(TEMPLATE_NAME, &context)
            .map(|rendered| rendered.trim_end().to_string())
            .map_err(|e| LlmError::Template(format!("{e:#}")))
    }
}
