use serde::Serialize;
use tera::{Context, Tera};

/// Tera-backed engine holding the crate's built-in templates.
///
/// Templates whose name ends in `.html` are autoescaped; `.txt` templates are
/// rendered verbatim.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create an engine with the given `(name, source)` templates registered.
    pub fn with_templates(templates: &[(&str, &str)]) -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().copied())?;
        Ok(Self { tera })
    }

    /// Render a named template with a serializable value as its context.
    pub fn render<T: Serialize>(&self, template_name: &str, value: &T) -> anyhow::Result<String> {
        let context = Context::from_serialize(value)?;
        let rendered = self.tera.render(template_name, &context)?;
        Ok(rendered)
    }
}
