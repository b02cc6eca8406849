//! Shared chart pipeline used by both front-ends.
//!
//! One catalog entry runs: fetch -> normalize -> filter -> (aggregate | select)
//! -> series assembly. Keeping this in one place means the batch renderer and
//! the TUI only differ in presentation.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::config;
use crate::data::EurostatClient;
use crate::domain::{ChartKind, ChartSpec, LineStyle, LongTable, Observation, Palette, Series};
use crate::error::AppError;
use crate::transform;

/// Everything a renderer needs for one chart.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub spec: ChartSpec,
    pub series: Vec<Series>,
    pub fetched_at: DateTime<Local>,
    /// Wide rows in the fetched dataset, before any reshaping.
    pub rows_fetched: usize,
    /// Long rows after the melt, before chart-level filtering.
    pub rows_melted: usize,
}

impl ChartData {
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let mut min = i32::MAX;
        let mut max = i32::MIN;
        for s in &self.series {
            for &(year, _) in &s.points {
                min = min.min(year);
                max = max.max(year);
            }
        }
        (min <= max).then_some((min, max))
    }
}

/// Run the full pipeline for one catalog entry.
///
/// Each invocation re-fetches the dataset and recomputes everything; nothing
/// is cached or shared across charts.
pub fn run_chart(client: &EurostatClient, spec: &ChartSpec) -> Result<ChartData, AppError> {
    let table = client.fetch_dataset(spec.dataset)?;
    let rows_fetched = table.rows.len();

    let mut long = transform::normalize(&table)?;
    let rows_melted = long.rows.len();

    // Chart-level dimension filters. An unknown dimension silently matches
    // nothing (the chart comes out empty, not failed).
    if let Some(unit) = spec.unit {
        long.retain_dim("unit", unit);
    }
    if let Some((dim, value)) = spec.filter {
        long.retain_dim(dim, value);
    }

    let series = match spec.kind {
        ChartKind::Indicator => indicator_series(&long),
        ChartKind::Sectoral { geo } => sectoral_series(&long, geo),
    };

    debug!(dataset = spec.dataset, series = series.len(), "chart data ready");

    Ok(ChartData {
        spec: *spec,
        series,
        fetched_at: Local::now(),
        rows_fetched,
        rows_melted,
    })
}

/// Headline countries plus the synthetic reference-set average.
fn indicator_series(long: &LongTable) -> Vec<Series> {
    let obs: Vec<Observation> = long
        .rows
        .iter()
        .map(|r| Observation {
            key: long.geo(r).to_string(),
            year: r.year,
            value: r.value,
        })
        .collect();

    let average =
        transform::reference_average(&obs, config::REFERENCE_GEOS, config::REFERENCE_AVG_KEY);
    let combined = transform::combine(&obs, config::HEADLINE_GEOS, average);

    build_series(&combined, &config::INDICATOR_PALETTE)
}

/// Top sectors by cumulative value for one country.
fn sectoral_series(long: &LongTable, geo: &str) -> Vec<Series> {
    let Some(nace_idx) = long.dim_index("nace_r2") else {
        return Vec::new();
    };

    let obs: Vec<Observation> = long
        .rows
        .iter()
        .filter(|r| long.geo(r) == geo)
        .map(|r| Observation {
            key: r.dims[nace_idx].clone(),
            year: r.year,
            value: r.value,
        })
        .collect();

    let mut top = transform::top_categories(&obs, config::SECTOR_LABELS, config::TOP_SECTORS);
    top.retain(|o| o.value.is_finite() && o.value > 0.0);

    build_series(&top, &config::SECTOR_PALETTE)
}

/// Partition observations by key into draw-ready series, resolving colors and
/// labels through the palette. The sentinel aggregate draws dashed.
fn build_series(obs: &[Observation], palette: &Palette) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for o in obs {
        let idx = match series.iter().position(|s| s.key == o.key) {
            Some(idx) => idx,
            None => {
                series.push(Series {
                    key: o.key.clone(),
                    label: palette.label(&o.key).to_string(),
                    color: palette.color(&o.key),
                    line: if o.key == config::REFERENCE_AVG_KEY {
                        LineStyle::Dashed
                    } else {
                        LineStyle::Solid
                    },
                    points: Vec::new(),
                });
                series.len() - 1
            }
        };
        series[idx].points.push((o.year, o.value));
    }

    for s in &mut series {
        s.points.sort_by_key(|&(year, _)| year);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(key: &str, year: i32, value: f64) -> Observation {
        Observation {
            key: key.to_string(),
            year,
            value,
        }
    }

    #[test]
    fn build_series_partitions_by_key_and_sorts_by_year() {
        let input = vec![
            obs("EL", 2021, 2.0),
            obs("EU27_2020", 2020, 3.0),
            obs("EL", 2020, 1.0),
        ];
        let series = build_series(&input, &config::INDICATOR_PALETTE);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].key, "EL");
        assert_eq!(series[0].label, "Greece");
        assert_eq!(series[0].points, vec![(2020, 1.0), (2021, 2.0)]);
        assert_eq!(series[1].label, "EU27 (2020)");
    }

    #[test]
    fn sentinel_series_draws_dashed() {
        let input = vec![obs(config::REFERENCE_AVG_KEY, 2020, 1.0), obs("EL", 2020, 1.0)];
        let series = build_series(&input, &config::INDICATOR_PALETTE);

        assert_eq!(series[0].line, LineStyle::Dashed);
        assert_eq!(series[0].label, "Bottom 10 Avg");
        assert_eq!(series[1].line, LineStyle::Solid);
    }

    #[test]
    fn sectoral_series_requires_the_category_dimension() {
        let long = LongTable {
            dim_names: vec!["unit".to_string(), "geo".to_string()],
            geo_idx: 1,
            rows: vec![crate::domain::LongRow {
                dims: vec!["CLV15_MEUR".to_string(), "EL".to_string()],
                year: 2020,
                value: 1.0,
            }],
        };
        assert!(sectoral_series(&long, "EL").is_empty());
    }

    #[test]
    fn sectoral_series_selects_and_labels_sectors() {
        let mut rows = Vec::new();
        for (code, value) in [("A", 10.0), ("C", 30.0), ("X", 99.0)] {
            rows.push(crate::domain::LongRow {
                dims: vec![code.to_string(), "EL".to_string()],
                year: 2020,
                value,
            });
        }
        // Another country's rows never contribute.
        rows.push(crate::domain::LongRow {
            dims: vec!["C".to_string(), "DE".to_string()],
            year: 2020,
            value: 1000.0,
        });

        let long = LongTable {
            dim_names: vec!["nace_r2".to_string(), "geo".to_string()],
            geo_idx: 1,
            rows,
        };
        let series = sectoral_series(&long, "EL");

        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Γεωργία, Δασοκομία και Αλιεία", "Μεταποιητική Βιομηχανία"]
        );
        assert_eq!(series[1].points, vec![(2020, 30.0)]);
    }
}
