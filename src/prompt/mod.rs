pub mod engine;
pub mod system_instruction;

pub use engine::TemplateEngine;
pub use system_instruction::{SystemInstructionBuilder, ToneHint, tone_hint};
