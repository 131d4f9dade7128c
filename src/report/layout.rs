//! Page model and the forward-only cursor used to fill it.
//!
//! Coordinates are millimetres on an A4 page, origin top-left, matching the
//! SVG viewBox the document is rendered into. Font sizes are in points.

use serde::Serialize;

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;
pub const MARGIN_LEFT: f64 = 20.0;
/// Cursor position after a page break.
pub const PAGE_TOP: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn css(self) -> String {
        format!("rgb({},{},{})", self.0, self.1, self.2)
    }
}

pub mod palette {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb(19, 19, 20);
    pub const ACCENT: Rgb = Rgb(168, 85, 247);
    pub const TITLE: Rgb = Rgb(227, 227, 227);
    pub const MUTED: Rgb = Rgb(150, 150, 150);
    pub const FAINT: Rgb = Rgb(100, 100, 100);
    pub const AXIS: Rgb = Rgb(80, 80, 80);
    pub const BODY: Rgb = Rgb(200, 200, 200);
    pub const TRANSCRIPT: Rgb = Rgb(220, 220, 220);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawOp {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        color: Rgb,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Rgb,
    },
    Dot {
        cx: f64,
        cy: f64,
        r: f64,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    fn themed() -> Self {
        Self {
            ops: vec![DrawOp::FillRect {
                x: 0.0,
                y: 0.0,
                width: PAGE_WIDTH,
                height: PAGE_HEIGHT,
                color: palette::BACKGROUND,
            }],
        }
    }
}

/// A finished report: fixed-size pages of drawing primitives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub pages: Vec<Page>,
}

impl ReportDocument {
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages.iter().flat_map(|page| page.ops.iter())
    }

    /// Every text run in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Single-pass writer: blocks are appended to the last page and a vertical
/// cursor tracks consumed space. Nothing already written is revisited.
pub(crate) struct PageWriter {
    pages: Vec<Page>,
    y: f64,
}

impl PageWriter {
    pub(crate) fn new(start_y: f64) -> Self {
        Self {
            pages: vec![Page::themed()],
            y: start_y,
        }
    }

    pub(crate) fn y(&self) -> f64 {
        self.y
    }

    pub(crate) fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub(crate) fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Start a new page when the cursor is already past `threshold`.
    pub(crate) fn break_if_past(&mut self, threshold: f64) {
        if self.y > threshold {
            self.pages.push(Page::themed());
            self.y = PAGE_TOP;
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    pub(crate) fn text(&mut self, x: f64, y: f64, text: impl Into<String>, size: f64, color: Rgb) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            size,
            color,
        });
    }

    /// Text at the left margin on the cursor line.
    pub(crate) fn text_here(&mut self, text: impl Into<String>, size: f64, color: Rgb) {
        self.text(MARGIN_LEFT, self.y, text, size, color);
    }

    pub(crate) fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb) {
        self.push(DrawOp::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            width,
            color,
        });
    }

    pub(crate) fn dot(&mut self, center: (f64, f64), r: f64, color: Rgb) {
        self.push(DrawOp::Dot {
            cx: center.0,
            cy: center.1,
            r,
            color,
        });
    }

    pub(crate) fn finish(self) -> ReportDocument {
        ReportDocument { pages: self.pages }
    }
}
