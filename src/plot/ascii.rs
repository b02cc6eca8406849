//! ASCII plotting for the batch front-end.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a plain terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - one marker glyph per series (`o`, `*`, `+`, ...)
//! - solid series connect with `-`, dashed (aggregate) series with `.`
//! - a legend mapping glyphs to display labels

use crate::app::pipeline::ChartData;
use crate::domain::{LineStyle, Series};

const SERIES_GLYPHS: &[char] = &['o', '*', '+', 'x', '#', '@', '%', '&'];

/// Render one chart as a character grid with a range header and a legend.
pub fn render_ascii_chart(data: &ChartData, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_range, y_range)) = ranges(&data.series) else {
        return "(no data)\n".to_string();
    };
    let (x_min, x_max) = widen_if_flat(x_range);
    let (y_min, y_max) = pad_range(y_range.0, y_range.1, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Lines first, all series, so every marker overlays every line.
    for s in &data.series {
        let mut prev: Option<(usize, usize)> = None;
        for &(year, value) in &s.points {
            let x = map_x(year as f64, x_min, x_max, width);
            let y = map_y(value, y_min, y_max, height);
            if let Some((x0, y0)) = prev {
                draw_line(&mut grid, x0, y0, x, y, line_glyph(s.line));
            }
            prev = Some((x, y));
        }
    }
    for (i, s) in data.series.iter().enumerate() {
        let glyph = SERIES_GLYPHS[i % SERIES_GLYPHS.len()];
        for &(year, value) in &s.points {
            let x = map_x(year as f64, x_min, x_max, width);
            let y = map_y(value, y_min, y_max, height);
            grid[y][x] = glyph;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: years=[{x_min:.0}, {x_max:.0}] | y=[{}, {}]\n",
        data.spec.y_format.tick_label(y_min),
        data.spec.y_format.tick_label(y_max),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (i, s) in data.series.iter().enumerate() {
        let glyph = SERIES_GLYPHS[i % SERIES_GLYPHS.len()];
        out.push_str(&format!("  {glyph} {}\n", s.label));
    }

    out
}

fn line_glyph(line: LineStyle) -> char {
    match line {
        LineStyle::Solid => '-',
        LineStyle::Dashed => '.',
    }
}

fn ranges(series: &[Series]) -> Option<((f64, f64), (f64, f64))> {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for s in series {
        for &(year, value) in &s.points {
            x_min = x_min.min(year as f64);
            x_max = x_max.max(year as f64);
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }

    if x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite() {
        Some(((x_min, x_max), (y_min, y_max)))
    } else {
        None
    }
}

/// A single-year chart still needs a drawable x span.
fn widen_if_flat((min, max): (f64, f64)) -> (f64, f64) {
    if max > min { (min, max) } else { (min - 1.0, max + 1.0) }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only blank cells are written, so
/// markers and earlier series stay visible.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::ChartData;
    use crate::config;
    use crate::domain::{LineStyle, Rgb, Series};
    use chrono::Local;

    fn chart(series: Vec<Series>) -> ChartData {
        ChartData {
            spec: config::CHARTS[0],
            series,
            fetched_at: Local::now(),
            rows_fetched: 0,
            rows_melted: 0,
        }
    }

    fn series(label: &str, line: LineStyle, points: Vec<(i32, f64)>) -> Series {
        Series {
            key: label.to_string(),
            label: label.to_string(),
            color: Rgb(0, 0, 0),
            line,
            points,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let data = chart(vec![series(
            "Greece",
            LineStyle::Solid,
            vec![(2019, 1.0), (2020, 2.0), (2021, 3.0)],
        )]);

        let txt = render_ascii_chart(&data, 12, 5);
        let expected = concat!(
            "Plot: years=[2019, 2021] | y=[1, 3]\n",
            "          -o\n",
            "        --  \n",
            "     -o-    \n",
            "  ---       \n",
            "o-          \n",
            "  o Greece\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn dashed_series_draw_with_dots() {
        let data = chart(vec![series(
            "Bottom 10 Avg",
            LineStyle::Dashed,
            vec![(2019, 1.0), (2021, 1.0)],
        )]);

        let txt = render_ascii_chart(&data, 5, 5);
        assert!(txt.contains("o...o"), "plot was:\n{txt}");
        assert!(txt.contains("o Bottom 10 Avg"));
    }

    #[test]
    fn empty_chart_renders_a_note() {
        let data = chart(Vec::new());
        assert_eq!(render_ascii_chart(&data, 20, 10), "(no data)\n");
    }
}
