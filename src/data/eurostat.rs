//! Eurostat dissemination API integration.
//!
//! Datasets are fetched from the SDMX TSV endpoint and parsed into
//! [`WideTable`]s. Fetches are synchronous and never retried: whatever the
//! source reports propagates to the caller.

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::domain::{WideRow, WideTable};
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://ec.europa.eu/eurostat/api/dissemination/sdmx/2.1/data";

pub struct EurostatClient {
    client: Client,
    base_url: String,
}

impl EurostatClient {
    /// Build a client, honoring an optional `EUROSTAT_BASE_URL` override from
    /// the environment (`.env` supported). Tests and mirrors point the client
    /// elsewhere; everything else hits the public API.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("EUROSTAT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch one dataset as a wide table.
    pub fn fetch_dataset(&self, dataset: &str) -> Result<WideTable, AppError> {
        let url = format!("{}/{dataset}", self.base_url);
        debug!(%url, "fetching dataset");

        let resp = self
            .client
            .get(&url)
            .query(&[("format", "TSV"), ("compressed", "false")])
            .send()
            .map_err(|e| AppError::upstream(format!("Request for dataset '{dataset}' failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "Request for dataset '{dataset}' failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::upstream(format!("Failed to read response for '{dataset}': {e}")))?;

        let table = parse_tsv(dataset, &body)?;
        info!(
            dataset,
            rows = table.rows.len(),
            periods = table.period_names.len(),
            "fetched dataset"
        );
        Ok(table)
    }
}

/// Parse an SDMX TSV body into a wide table.
///
/// Layout: the first header cell is a comma-separated dimension list whose
/// last entry combines geography and time (e.g.
/// `freq,unit,na_item,geo\TIME_PERIOD`); every other header cell names a
/// period. Data cells hold a number optionally followed by flag letters, or
/// `:` for a missing observation.
pub fn parse_tsv(dataset: &str, body: &str) -> Result<WideTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .has_headers(false)
        .from_reader(body.as_bytes());

    let mut records = reader.records();

    let header = records
        .next()
        .ok_or_else(|| AppError::upstream(format!("Dataset '{dataset}': empty response body.")))?
        .map_err(|e| AppError::upstream(format!("Dataset '{dataset}': TSV parse error: {e}")))?;

    if header.len() < 2 {
        return Err(AppError::upstream(format!(
            "Dataset '{dataset}': header has no period columns."
        )));
    }

    let dim_names: Vec<String> = header
        .get(0)
        .unwrap_or("")
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();
    let period_names: Vec<String> = header.iter().skip(1).map(|s| s.trim().to_string()).collect();

    let mut rows = Vec::new();
    for (idx, record) in records.enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        let record = record.map_err(|e| {
            AppError::upstream(format!("Dataset '{dataset}': TSV parse error on line {line}: {e}"))
        })?;

        let Some(first) = record.get(0) else { continue };
        if first.trim().is_empty() {
            continue;
        }

        let dims: Vec<String> = first.split(',').map(|s| s.trim().to_string()).collect();
        if dims.len() != dim_names.len() {
            return Err(AppError::upstream(format!(
                "Dataset '{dataset}': line {line} has {} dimension values, expected {}.",
                dims.len(),
                dim_names.len()
            )));
        }

        let values = (0..period_names.len())
            .map(|i| parse_value(record.get(i + 1).unwrap_or("")))
            .collect();

        rows.push(WideRow { dims, values });
    }

    Ok(WideTable {
        dataset: dataset.to_string(),
        dim_names,
        period_names,
        rows,
    })
}

/// Missing observations are `:`; values may carry trailing flag letters
/// (`"100.5 p"`). Non-finite values are treated as missing.
fn parse_value(raw: &str) -> Option<f64> {
    let token = raw.split_whitespace().next()?;
    if token == ":" {
        return None;
    }
    let v = token.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_handles_flags_and_missing() {
        assert_eq!(parse_value("100.5"), Some(100.5));
        assert_eq!(parse_value("100.5 p"), Some(100.5));
        assert_eq!(parse_value(" 7 e"), Some(7.0));
        assert_eq!(parse_value(":"), None);
        assert_eq!(parse_value(": c"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("inf"), None);
    }

    #[test]
    fn parse_tsv_splits_dimensions_and_periods() {
        let body = "freq,unit,geo\\TIME_PERIOD\t2019 \t2020 \n\
                    A,PC_GDP,EL\t180.6\t206.3 p\n\
                    A,PC_GDP,DE\t58.9\t: \n";
        let table = parse_tsv("tipsgo10", body).unwrap();

        assert_eq!(table.dim_names, vec!["freq", "unit", "geo\\TIME_PERIOD"]);
        assert_eq!(table.period_names, vec!["2019", "2020"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].dims, vec!["A", "PC_GDP", "EL"]);
        assert_eq!(table.rows[0].values, vec![Some(180.6), Some(206.3)]);
        assert_eq!(table.rows[1].values, vec![Some(58.9), None]);
    }

    #[test]
    fn parse_tsv_rejects_ragged_dimension_cells() {
        let body = "freq,geo\\TIME_PERIOD\t2020\n\
                    A\t1.0\n";
        let err = parse_tsv("bad", body).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn parse_tsv_rejects_headerless_body() {
        let err = parse_tsv("empty", "").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
