//! Shared domain types.
//!
//! These types are intentionally concrete and lightweight. Each chart
//! invocation builds them fresh from the fetched dataset and discards them
//! after rendering; nothing is mutated after creation.

/// A wide-format dataset as served by the statistics API: one row per
/// dimension combination, one column per calendar period.
#[derive(Debug, Clone)]
pub struct WideTable {
    /// Dataset code this table was fetched for (used in error messages).
    pub dataset: String,
    /// Raw dimension column names in source order. The last one is the
    /// combined geography/time header (e.g. `geo\TIME_PERIOD`).
    pub dim_names: Vec<String>,
    /// Raw period column names in source order.
    pub period_names: Vec<String>,
    pub rows: Vec<WideRow>,
}

/// One wide row: dimension values aligned with `dim_names`, one optional
/// value per period column.
#[derive(Debug, Clone)]
pub struct WideRow {
    pub dims: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Long-format rows produced by the normalizer.
///
/// All source dimensions are retained so chart-level filters (unit, extra
/// dimension) can run after the melt.
#[derive(Debug, Clone)]
pub struct LongTable {
    /// Lower-cased dimension names; the combined geography/time column has
    /// been renamed to `geo`.
    pub dim_names: Vec<String>,
    /// Index of the `geo` dimension within `dim_names`.
    pub geo_idx: usize,
    pub rows: Vec<LongRow>,
}

/// One melted row: dimension values, integer year, non-null value.
#[derive(Debug, Clone)]
pub struct LongRow {
    pub dims: Vec<String>,
    pub year: i32,
    pub value: f64,
}

impl LongTable {
    pub fn dim_index(&self, name: &str) -> Option<usize> {
        self.dim_names.iter().position(|n| n == name)
    }

    /// The entity key of a row.
    pub fn geo<'a>(&self, row: &'a LongRow) -> &'a str {
        &row.dims[self.geo_idx]
    }

    /// Keep only rows whose `dim` value equals `value`.
    ///
    /// A dimension name the dataset does not have matches nothing: chart
    /// filters are applied as configured, without validation.
    pub fn retain_dim(&mut self, dim: &str, value: &str) {
        match self.dim_index(dim) {
            Some(idx) => self.rows.retain(|r| r.dims[idx] == value),
            None => self.rows.clear(),
        }
    }
}

/// A plot-ready observation: entity (or category) key, year, value.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub key: String,
    pub year: i32,
    pub value: f64,
}

/// Line style of a rendered series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    /// Synthetic aggregate series draw dashed so derived data reads as such.
    Dashed,
}

/// One renderable series: points sorted by year, resolved label and color.
#[derive(Debug, Clone)]
pub struct Series {
    pub key: String,
    pub label: String,
    pub color: Rgb,
    pub line: LineStyle,
    pub points: Vec<(i32, f64)>,
}

/// Value-axis tick formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Plain,
    /// Append a percent sign to value-axis tick labels.
    Percent,
}

impl ValueFormat {
    pub fn tick_label(self, v: f64) -> String {
        match self {
            ValueFormat::Plain => format!("{v:.0}"),
            ValueFormat::Percent => format!("{v:.0}%"),
        }
    }
}

/// An RGB color in styling lookups; renderers convert to their backend's
/// color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Styling configuration handed explicitly to the render step.
///
/// Keys absent from `colors` render in `fallback`; keys absent from `labels`
/// keep their raw key as display label. There is no global theme state.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub colors: &'static [(&'static str, Rgb)],
    pub labels: &'static [(&'static str, &'static str)],
    pub fallback: Rgb,
}

impl Palette {
    pub fn color(&self, key: &str) -> Rgb {
        self.colors
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| *c)
            .unwrap_or(self.fallback)
    }

    pub fn label<'a>(&self, key: &'a str) -> &'a str {
        self.labels
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, l)| *l)
            .unwrap_or(key)
    }
}

/// Which routine a catalog entry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Headline countries vs the reference-set average.
    Indicator,
    /// Top sectors by cumulative value for one country.
    Sectoral { geo: &'static str },
}

/// One entry of the static chart catalog.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub dataset: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub y_label: &'static str,
    /// Optional `unit` dimension filter.
    pub unit: Option<&'static str>,
    /// Optional extra (dimension, value) filter.
    pub filter: Option<(&'static str, &'static str)>,
    pub y_format: ValueFormat,
    pub kind: ChartKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LongTable {
        LongTable {
            dim_names: vec!["unit".to_string(), "geo".to_string()],
            geo_idx: 1,
            rows: vec![
                LongRow {
                    dims: vec!["PC".to_string(), "EL".to_string()],
                    year: 2020,
                    value: 1.0,
                },
                LongRow {
                    dims: vec!["MEUR".to_string(), "EL".to_string()],
                    year: 2020,
                    value: 2.0,
                },
            ],
        }
    }

    #[test]
    fn retain_dim_filters_matching_rows() {
        let mut t = table();
        t.retain_dim("unit", "PC");
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].value, 1.0);
    }

    #[test]
    fn retain_dim_unknown_dimension_matches_nothing() {
        let mut t = table();
        t.retain_dim("age", "Y15-24");
        assert!(t.rows.is_empty());
    }

    #[test]
    fn palette_falls_back_for_unknown_keys() {
        let palette = Palette {
            colors: &[("EL", Rgb(1, 2, 3))],
            labels: &[("EL", "Greece")],
            fallback: Rgb(9, 9, 9),
        };
        assert_eq!(palette.color("EL"), Rgb(1, 2, 3));
        assert_eq!(palette.color("XX"), Rgb(9, 9, 9));
        assert_eq!(palette.label("EL"), "Greece");
        assert_eq!(palette.label("XX"), "XX");
    }
}
