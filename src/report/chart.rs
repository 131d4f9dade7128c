//! Emotional journey chart: one point per emotion event, joined by segments.

use super::layout::{PageWriter, palette};
use crate::session::EmotionEvent;

pub const CHART_TITLE: &str = "Emotional Journey Chart";
pub const INSUFFICIENT_DATA: &str = "Insufficient data for mapping journey.";

pub const CHART_BASE_X: f64 = 30.0;
pub const CHART_WIDTH: f64 = 150.0;
pub const CHART_HEIGHT: f64 = 40.0;
/// Distance from the section title down to the chart baseline.
const BASELINE_OFFSET: f64 = 50.0;
/// Cursor advance below the baseline once the chart is drawn.
const AFTER_CHART: f64 = 25.0;

const AXIS_WIDTH: f64 = 0.5;
pub const SEGMENT_WIDTH: f64 = 1.0;
const DOT_RADIUS: f64 = 1.0;

/// Plot coordinates for `history` against `baseline`.
///
/// Fewer than two events cannot form a line, so they yield no points.
pub fn plot_points(history: &[EmotionEvent], baseline: f64) -> Vec<(f64, f64)> {
    if history.len() < 2 {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let step = CHART_WIDTH / (history.len() - 1) as f64;

    history
        .iter()
        .enumerate()
        .map(|(i, event)| {
            #[allow(clippy::cast_precision_loss)]
            let x = CHART_BASE_X + i as f64 * step;
            let y = baseline - event.emotion.chart_value() * CHART_HEIGHT;
            (x, y)
        })
        .collect()
}

/// Draw the chart section at the writer's cursor and move the cursor below it.
pub(crate) fn draw(writer: &mut PageWriter, history: &[EmotionEvent], heading_size: f64) {
    writer.text_here(CHART_TITLE, heading_size, palette::ACCENT);

    let baseline = writer.y() + BASELINE_OFFSET;
    let origin = (CHART_BASE_X, baseline);
    writer.line(
        origin,
        (CHART_BASE_X + CHART_WIDTH, baseline),
        AXIS_WIDTH,
        palette::AXIS,
    );
    writer.line(
        origin,
        (CHART_BASE_X, baseline - CHART_HEIGHT),
        AXIS_WIDTH,
        palette::AXIS,
    );

    let points = plot_points(history, baseline);
    if points.is_empty() {
        writer.text(
            CHART_BASE_X + 10.0,
            baseline - 20.0,
            INSUFFICIENT_DATA,
            10.0,
            palette::FAINT,
        );
    } else {
        for pair in points.windows(2) {
            writer.line(pair[0], pair[1], SEGMENT_WIDTH, palette::ACCENT);
        }
        for &point in &points {
            writer.dot(point, DOT_RADIUS, palette::ACCENT);
        }
    }

    let label_x = CHART_BASE_X - 12.0;
    writer.text(label_x, baseline - CHART_HEIGHT, "Happy", 8.0, palette::FAINT);
    writer.text(
        label_x,
        baseline - CHART_HEIGHT / 2.0,
        "Neutral",
        8.0,
        palette::FAINT,
    );
    writer.text(label_x, baseline, "Frustrated", 8.0, palette::FAINT);

    writer.set_y(baseline + AFTER_CHART);
}
