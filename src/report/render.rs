//! HTML serialisation: one inline SVG per page.

use super::layout::{DrawOp, PAGE_HEIGHT, PAGE_WIDTH, ReportDocument};
use crate::prompt::TemplateEngine;
use serde::Serialize;

pub(crate) const TEMPLATE_NAME: &str = "report.html";

pub(crate) const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>
body { margin: 0; padding: 8mm 0; background: #0b0b0c; }
svg.page { display: block; margin: 0 auto 8mm auto; font-family: Helvetica, Arial, sans-serif; white-space: pre; }
@media print { body { padding: 0; } svg.page { margin: 0; break-after: page; } }
</style>
</head>
<body>
{% for page in pages -%}
<svg class="page" xmlns="http://www.w3.org/2000/svg" width="{{ width }}mm" height="{{ height }}mm" viewBox="0 0 {{ width }} {{ height }}">
{% for el in page -%}
{% if el.kind == "rect" -%}
<rect x="{{ el.x }}" y="{{ el.y }}" width="{{ el.width }}" height="{{ el.height }}" fill="{{ el.fill }}"/>
{% elif el.kind == "text" -%}
<text x="{{ el.x }}" y="{{ el.y }}" font-size="{{ el.size }}" fill="{{ el.fill }}">{{ el.text }}</text>
{% elif el.kind == "line" -%}
<line x1="{{ el.x1 }}" y1="{{ el.y1 }}" x2="{{ el.x2 }}" y2="{{ el.y2 }}" stroke="{{ el.stroke }}" stroke-width="{{ el.width }}" stroke-linecap="round"/>
{% elif el.kind == "circle" -%}
<circle cx="{{ el.cx }}" cy="{{ el.cy }}" r="{{ el.r }}" fill="{{ el.fill }}"/>
{% endif -%}
{% endfor -%}
</svg>
{% endfor -%}
</body>
</html>
"#;

/// Millimetres per typographic point.
const MM_PER_PT: f64 = 0.3528;

fn num(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SvgElement {
    Rect {
        x: String,
        y: String,
        width: String,
        height: String,
        fill: String,
    },
    Text {
        x: String,
        y: String,
        size: String,
        fill: String,
        text: String,
    },
    Line {
        x1: String,
        y1: String,
        x2: String,
        y2: String,
        width: String,
        stroke: String,
    },
    Circle {
        cx: String,
        cy: String,
        r: String,
        fill: String,
    },
}

impl From<&DrawOp> for SvgElement {
    fn from(op: &DrawOp) -> Self {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => SvgElement::Rect {
                x: num(*x),
                y: num(*y),
                width: num(*width),
                height: num(*height),
                fill: color.css(),
            },
            DrawOp::Text {
                x,
                y,
                text,
                size,
                color,
            } => SvgElement::Text {
                x: num(*x),
                y: num(*y),
                size: num(size * MM_PER_PT),
                fill: color.css(),
                text: text.clone(),
            },
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => SvgElement::Line {
                x1: num(*x1),
                y1: num(*y1),
                x2: num(*x2),
                y2: num(*y2),
                width: num(*width),
                stroke: color.css(),
            },
            DrawOp::Dot { cx, cy, r, color } => SvgElement::Circle {
                cx: num(*cx),
                cy: num(*cy),
                r: num(*r),
                fill: color.css(),
            },
        }
    }
}

#[derive(Serialize)]
struct HtmlContext<'a> {
    title: &'a str,
    width: String,
    height: String,
    pages: Vec<Vec<SvgElement>>,
}

pub(crate) fn render_html(
    engine: &TemplateEngine,
    title: &str,
    document: &ReportDocument,
) -> anyhow::Result<String> {
    let context = HtmlContext {
        title,
        width: num(PAGE_WIDTH),
        height: num(PAGE_HEIGHT),
        pages: document
            .pages
            .iter()
            .map(|page| page.ops.iter().map(SvgElement::from).collect())
            .collect(),
    };
    engine.render(TEMPLATE_NAME, &context)
}
