//! Static health trend chart
//!
//! Ten canned daily readings rendered as a terminal line chart, one lane
//! per series. Each lane is scaled to its own range since heart rate and
//! temperature share no useful common axis.

use chrono::{Duration, NaiveDate};

pub const CHART_TITLE: &str = "Health Trends";

const HEART_RATES: [u32; 10] = [72, 75, 78, 80, 76, 74, 77, 79, 81, 73];
const TEMPERATURES: [f64; 10] = [36.5, 36.6, 36.7, 36.8, 36.5, 36.4, 36.7, 36.6, 36.9, 36.5];

/// One day of the canned series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub heart_rate: u32,
    pub temperature: f64,
}

/// Fixed ten-day series starting 2024-02-01
pub fn series() -> Vec<TrendPoint> {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default();

    HEART_RATES
        .iter()
        .zip(TEMPERATURES.iter())
        .enumerate()
        .map(|(day, (&heart_rate, &temperature))| TrendPoint {
            date: start + Duration::days(day as i64),
            heart_rate,
            temperature,
        })
        .collect()
}

/// Render both series as plain-text lanes, `height` rows each
pub fn render_chart(points: &[TrendPoint], height: usize) -> Vec<String> {
    let mut lines = vec![CHART_TITLE.to_string()];
    if points.is_empty() {
        lines.push("(no data)".to_string());
        return lines;
    }

    let height = height.max(2);
    let heart: Vec<f64> = points.iter().map(|p| p.heart_rate as f64).collect();
    let temp: Vec<f64> = points.iter().map(|p| p.temperature).collect();

    lines.extend(render_lane("Heart Rate", &heart, height, 0));
    lines.push(String::new());
    lines.extend(render_lane("Temperature", &temp, height, 1));
    lines.push(String::new());
    lines.push(date_axis(points));
    lines
}

const COLUMN_WIDTH: usize = 6;
const LABEL_WIDTH: usize = 8;

fn render_lane(name: &str, values: &[f64], height: usize, decimals: usize) -> Vec<String> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };

    let rows: Vec<usize> = values
        .iter()
        .map(|v| (((v - min) / span) * (height - 1) as f64).round() as usize)
        .collect();

    let mut lines = vec![name.to_string()];
    for level in (0..height).rev() {
        let label = if level == height - 1 {
            format!("{:>w$.d$}", max, w = LABEL_WIDTH - 1, d = decimals)
        } else if level == 0 {
            format!("{:>w$.d$}", min, w = LABEL_WIDTH - 1, d = decimals)
        } else {
            " ".repeat(LABEL_WIDTH - 1)
        };

        let mut row = format!("{}|", label);
        for (i, &r) in rows.iter().enumerate() {
            let cell = if r == level {
                "o"
            } else if i + 1 < rows.len() && crosses(r, rows[i + 1], level) {
                "-"
            } else {
                " "
            };
            row.push_str(&format!("{:^w$}", cell, w = COLUMN_WIDTH));
        }
        lines.push(row.trim_end().to_string());
    }
    lines
}

/// True when the segment to the next point passes strictly through `level`
fn crosses(from: usize, to: usize, level: usize) -> bool {
    let (lo, hi) = if from < to { (from, to) } else { (to, from) };
    level > lo && level < hi
}

fn date_axis(points: &[TrendPoint]) -> String {
    let mut axis = " ".repeat(LABEL_WIDTH);
    for point in points {
        axis.push_str(&format!("{:^w$}", point.date.format("%m-%d").to_string(), w = COLUMN_WIDTH));
    }
    axis.trim_end().to_string()
}
