//! Chart and catalog summaries for terminal output.
//!
//! Formatting code lives in one place so output changes stay localized and
//! the pipeline stays clean and testable.

use crate::app::pipeline::ChartData;
use crate::domain::{ChartKind, ChartSpec};

/// Chart header plus a per-series table.
pub fn format_chart_summary(idx: usize, data: &ChartData) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== [{idx}] {} ===\n", data.spec.title));
    out.push_str(&format!("{}\n", data.spec.subtitle));
    let years = match data.year_span() {
        Some((min, max)) => format!("{min}-{max}"),
        None => "-".to_string(),
    };
    out.push_str(&format!(
        "dataset: {} | fetched: {} | rows: {} wide / {} long | years: {years}\n",
        data.spec.dataset,
        data.fetched_at.format("%Y-%m-%d %H:%M:%S"),
        data.rows_fetched,
        data.rows_melted,
    ));

    if data.series.is_empty() {
        out.push_str("(no data after filtering)\n");
        return out;
    }

    out.push_str(&format!(
        "{:<32} {:>8} {:>12} {:>14}\n",
        "series", "points", "years", "last"
    ));
    out.push_str(&format!("{:-<32} {:-<8} {:-<12} {:-<14}\n", "", "", "", ""));

    for s in &data.series {
        let years = match (s.points.first(), s.points.last()) {
            (Some(&(a, _)), Some(&(b, _))) => format!("{a}-{b}"),
            _ => "-".to_string(),
        };
        let last = s
            .points
            .last()
            .map(|&(_, v)| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<32} {:>8} {:>12} {:>14}\n",
            truncate(&s.label, 32),
            s.points.len(),
            years,
            last,
        ));
    }

    out
}

/// The catalog listing for `esc list`.
pub fn format_catalog(charts: &[ChartSpec]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>3}  {:<16} {:<48} {}\n",
        "#", "dataset", "title", "filters"
    ));
    for (idx, spec) in charts.iter().enumerate() {
        let mut filters = Vec::new();
        if let Some(unit) = spec.unit {
            filters.push(format!("unit={unit}"));
        }
        if let Some((dim, value)) = spec.filter {
            filters.push(format!("{dim}={value}"));
        }
        if let ChartKind::Sectoral { geo } = spec.kind {
            filters.push(format!("geo={geo}"));
        }
        out.push_str(
            format!(
                "{idx:>3}  {:<16} {:<48} {}\n",
                spec.dataset,
                truncate(spec.title, 48),
                filters.join(", "),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::domain::{LineStyle, Rgb, Series};
    use chrono::Local;

    fn data(series: Vec<Series>) -> ChartData {
        ChartData {
            spec: config::CHARTS[0],
            series,
            fetched_at: Local::now(),
            rows_fetched: 3,
            rows_melted: 6,
        }
    }

    #[test]
    fn summary_lists_each_series() {
        let series = vec![Series {
            key: "EL".to_string(),
            label: "Greece".to_string(),
            color: Rgb(0, 0, 0),
            line: LineStyle::Solid,
            points: vec![(2019, 100.0), (2020, 110.0)],
        }];
        let out = format_chart_summary(0, &data(series));

        assert!(out.contains("Real Gross Disposable Income Per Capita"));
        assert!(out.contains("Greece"));
        assert!(out.contains("2019-2020"));
        assert!(out.contains("110.00"));
    }

    #[test]
    fn summary_notes_empty_charts() {
        let out = format_chart_summary(0, &data(Vec::new()));
        assert!(out.contains("(no data after filtering)"));
    }

    #[test]
    fn catalog_lists_every_entry_with_filters() {
        let out = format_catalog(config::CHARTS);
        for spec in config::CHARTS {
            assert!(out.contains(spec.dataset));
        }
        assert!(out.contains("age=Y15-24"));
        assert!(out.contains("geo=EL"));
    }

    #[test]
    fn truncate_keeps_short_strings_intact() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-rather-long-title", 8), "a-rathe.");
    }
}
