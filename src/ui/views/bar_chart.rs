//! Vertical bar chart drawn with block characters

use crate::ui::view_models::ChartSeries;

/// Rows between the zero axis and the ceiling
pub const CHART_HEIGHT: usize = 10;

const BAR: &str = "████";
const COLUMN_WIDTH: usize = 6;
const GUTTER_WIDTH: usize = 6;

/// Bar height in rows for a value, clamped into `[0, y_max]`
fn scaled_height(value: i32, y_max: i32, height: usize) -> usize {
    if y_max <= 0 {
        return 0;
    }
    let clamped = value.clamp(0, y_max) as usize;
    let y_max = y_max as usize;
    (clamped * height + y_max / 2) / y_max
}

fn tick_label(level: usize, height: usize, y_max: i32) -> String {
    if level == height {
        y_max.to_string()
    } else if level == height / 2 {
        (y_max / 2).to_string()
    } else {
        String::new()
    }
}

/// Draw the series into at most `width` columns
///
/// Bars that do not fit are left out and counted in the legend.
pub fn draw(series: &ChartSeries, width: usize, height: usize) -> Vec<String> {
    let capacity = width.saturating_sub(GUTTER_WIDTH) / COLUMN_WIDTH;
    let bars: Vec<(&str, usize)> = series
        .bars()
        .take(capacity)
        .map(|(label, value)| (label, scaled_height(value, series.y_max, height)))
        .collect();
    let hidden = series.values.len() - bars.len();

    let mut lines = Vec::with_capacity(height + 3);
    for level in (1..=height).rev() {
        let mut line = format!("{:>4} │", tick_label(level, height, series.y_max));
        for (_, bar_height) in &bars {
            line.push(' ');
            line.push_str(if *bar_height >= level { BAR } else { "    " });
            line.push(' ');
        }
        lines.push(line.trim_end().to_string());
    }

    lines.push(format!("{:>4} └{}", 0, "─".repeat(bars.len() * COLUMN_WIDTH)));

    let mut labels = " ".repeat(GUTTER_WIDTH);
    for (label, _) in &bars {
        let short: String = label.chars().take(COLUMN_WIDTH - 1).collect();
        labels.push_str(&format!("{short:<COLUMN_WIDTH$}"));
    }
    lines.push(labels.trim_end().to_string());

    let mut legend = format!("{}█ {}", " ".repeat(GUTTER_WIDTH), series.label);
    if hidden > 0 {
        legend.push_str(&format!("  (+{hidden} not shown)"));
    }
    lines.push(legend);
    lines
}
