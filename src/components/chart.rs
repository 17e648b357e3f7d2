//! Chart Components
//!
//! Score charts drawn on HTML5 Canvas. The data→series shaping is kept pure
//! so the analytics payload massaging can be tested without a DOM.

use leptos::*;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::SubjectPerformance;

/// Chart colors for different series
const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange (primary)
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

/// Labels plus values, ready for a chart renderer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Shape a recency-ordered score sequence into a line-chart series with
/// auto-generated "Eval 1..N" labels
pub fn trend_series(scores: &[f64]) -> ChartSeries {
    ChartSeries {
        labels: (1..=scores.len()).map(|i| format!("Eval {}", i)).collect(),
        values: scores.to_vec(),
    }
}

/// Shape per-subject averages into a doughnut series, sorted by subject name
pub fn subject_series(performance: &HashMap<String, SubjectPerformance>) -> ChartSeries {
    let mut entries: Vec<_> = performance
        .iter()
        .map(|(subject, perf)| (subject.clone(), perf.average_score))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    ChartSeries {
        labels: entries.iter().map(|(subject, _)| subject.clone()).collect(),
        values: entries.iter().map(|(_, score)| *score).collect(),
    }
}

/// Line chart of a score sequence
#[component]
pub fn LineChart(series: ChartSeries) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let series = store_value(series);

    // Draw once the canvas node is mounted
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            series.with_value(|s| draw_line_chart(&canvas, s));
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="600"
            height="300"
            class="w-full h-64 rounded-lg"
        />
    }
}

/// Doughnut chart with a legend listing each slice
#[component]
pub fn DoughnutChart(series: ChartSeries) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    let legend = series
        .labels
        .iter()
        .zip(series.values.iter())
        .enumerate()
        .map(|(idx, (label, value))| {
            let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
            view! {
                <div class="flex items-center space-x-2">
                    <div
                        class="w-3 h-3 rounded-full"
                        style=format!("background-color: {}", color)
                    />
                    <span class="text-sm text-gray-300 capitalize">{label.clone()}</span>
                    <span class="text-sm text-gray-500">{format!("{:.1}", value)}</span>
                </div>
            }
        })
        .collect_view();

    let series = store_value(series);
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            series.with_value(|s| draw_doughnut_chart(&canvas, s));
        }
    });

    view! {
        <div class="flex flex-col items-center space-y-4">
            <canvas
                node_ref=canvas_ref
                width="300"
                height="300"
                class="w-48 h-48"
            />
            <div class="flex flex-wrap justify-center gap-4">{legend}</div>
        </div>
    }
}

/// Draw the line chart on canvas
fn draw_line_chart(canvas: &HtmlCanvasElement, series: &ChartSeries) {
    let ctx = match context_2d(canvas) {
        Some(ctx) => ctx,
        None => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 45.0;
    let margin_right = 15.0;
    let margin_top = 15.0;
    let margin_bottom = 35.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if series.values.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No evaluations yet", width / 2.0 - 70.0, height / 2.0);
        return;
    }

    // Y range with padding
    let mut y_min = series.values.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut y_max = series
        .values
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);

    let y_range = y_max - y_min;
    let y_padding = if y_range > 0.0 { y_range * 0.1 } else { 1.0 };
    y_min -= y_padding;
    y_max += y_padding;

    // Grid and y-axis labels
    ctx.set_line_width(1.0);
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.set_stroke_style(&"#374151".into()); // gray-700
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * (y_max - y_min);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    let x_for = |i: usize| {
        if series.values.len() < 2 {
            margin_left + chart_width / 2.0
        } else {
            margin_left + (i as f64 / (series.values.len() - 1) as f64) * chart_width
        }
    };
    let y_for = |value: f64| margin_top + ((y_max - value) / (y_max - y_min)) * chart_height;

    // Line
    let color = SERIES_COLORS[0];
    ctx.set_stroke_style(&color.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, value) in series.values.iter().enumerate() {
        if i == 0 {
            ctx.move_to(x_for(i), y_for(*value));
        } else {
            ctx.line_to(x_for(i), y_for(*value));
        }
    }
    ctx.stroke();

    // Points
    ctx.set_fill_style(&color.into());
    for (i, value) in series.values.iter().enumerate() {
        ctx.begin_path();
        let _ = ctx.arc(x_for(i), y_for(*value), 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // X labels, thinned so they stay readable
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");
    let step = (series.labels.len() / 8).max(1);
    for (i, label) in series.labels.iter().enumerate() {
        if i % step != 0 {
            continue;
        }
        let _ = ctx.fill_text(label, x_for(i) - 18.0, height - 10.0);
    }
}

/// Draw the doughnut chart on canvas
fn draw_doughnut_chart(canvas: &HtmlCanvasElement, series: &ChartSeries) {
    let ctx = match context_2d(canvas) {
        Some(ctx) => ctx,
        None => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    ctx.set_fill_style(&"#1f2937".into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let total: f64 = series.values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("14px sans-serif");
        let _ = ctx.fill_text("No subject data", width / 2.0 - 50.0, height / 2.0);
        return;
    }

    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = width.min(height) / 2.0 - 10.0;

    let mut start = -std::f64::consts::FRAC_PI_2;
    for (idx, value) in series.values.iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        let sweep = value / total * std::f64::consts::PI * 2.0;
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];

        ctx.set_fill_style(&color.into());
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, start, start + sweep);
        ctx.close_path();
        ctx.fill();

        start += sweep;
    }

    // Punch the hole
    ctx.set_fill_style(&"#1f2937".into());
    ctx.begin_path();
    let _ = ctx.arc(cx, cy, radius * 0.55, 0.0, std::f64::consts::PI * 2.0);
    ctx.fill();
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_series_labels_by_position() {
        let series = trend_series(&[72.0, 85.5, 90.0]);
        assert_eq!(series.labels, vec!["Eval 1", "Eval 2", "Eval 3"]);
        assert_eq!(series.values, vec![72.0, 85.5, 90.0]);
    }

    #[test]
    fn test_trend_series_empty() {
        let series = trend_series(&[]);
        assert!(series.labels.is_empty());
        assert!(series.values.is_empty());
    }

    #[test]
    fn test_subject_series_sorted_by_subject() {
        let mut performance = HashMap::new();
        performance.insert(
            "physics".to_string(),
            SubjectPerformance {
                average_score: 64.0,
                total_evaluations: 3,
            },
        );
        performance.insert(
            "biology".to_string(),
            SubjectPerformance {
                average_score: 81.0,
                total_evaluations: 2,
            },
        );

        let series = subject_series(&performance);
        assert_eq!(series.labels, vec!["biology", "physics"]);
        assert_eq!(series.values, vec![81.0, 64.0]);
    }
}
