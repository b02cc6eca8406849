//! Wide-to-long normalization.
//!
//! Turns the fetched wide table into long rows that are safe to aggregate:
//! every output row has a lower-cased dimension set, a canonical `geo` key,
//! an integer year, and a non-null value.

use crate::domain::{LongRow, LongTable, WideTable};
use crate::error::AppError;

/// Canonical name of the entity-key dimension after normalization.
pub const GEO_DIM: &str = "geo";

/// Melt a wide table into long form.
///
/// Steps:
/// 1. lower-case every column name;
/// 2. locate the single dimension combining the geography and time markers
///    and rename it to `geo` — this is the upstream schema contract, and a
///    violation is a typed configuration error naming what was seen;
/// 3. treat columns that look like 4-digit years as periods;
/// 4. un-pivot each (row, year) pair, casting the period to an integer and
///    dropping missing values.
pub fn normalize(table: &WideTable) -> Result<LongTable, AppError> {
    let mut dim_names: Vec<String> = table
        .dim_names
        .iter()
        .map(|s| s.to_ascii_lowercase())
        .collect();

    let geo_idx = dim_names
        .iter()
        .position(|name| name.contains("geo") && name.contains("time"))
        .ok_or_else(|| schema_error(table, &dim_names))?;
    dim_names[geo_idx] = GEO_DIM.to_string();

    // (period column index, parsed year)
    let years: Vec<(usize, i32)> = table
        .period_names
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| Some((idx, parse_year(name)?)))
        .collect();

    let mut rows = Vec::new();
    for wide in &table.rows {
        for &(col, year) in &years {
            let Some(value) = wide.values.get(col).copied().flatten() else {
                continue;
            };
            rows.push(LongRow {
                dims: wide.dims.clone(),
                year,
                value,
            });
        }
    }

    Ok(LongTable {
        dim_names,
        geo_idx,
        rows,
    })
}

fn schema_error(table: &WideTable, dim_names: &[String]) -> AppError {
    AppError::config(format!(
        "Dataset '{}' violates the expected schema: no dimension combines the geography and time markers (saw: {}).",
        table.dataset,
        dim_names.join(", "),
    ))
}

/// A period column counts as a year when it has the 4-digit-year prefix and
/// parses as an integer. Sub-annual labels like `2020-Q1` are ignored rather
/// than aborting the cast.
fn parse_year(name: &str) -> Option<i32> {
    let name = name.trim();
    if !(name.starts_with("19") || name.starts_with("20")) {
        return None;
    }
    name.parse::<i32>().ok()
}
