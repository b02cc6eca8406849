//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up diagnostic logging for the non-interactive modes
//! - walks the chart catalog through the pipeline
//! - dispatches to the batch renderer or the TUI

use clap::Parser;

use crate::cli::{Command, RenderArgs};
use crate::domain::ChartSpec;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `esc` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `esc` (and `esc --chart 3`) to behave like `esc tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Render(args) => {
            init_logging();
            handle_render(args)
        }
        Command::List => {
            init_logging();
            handle_list()
        }
        Command::Tui(args) => crate::tui::run(args),
    }
}

/// `RUST_LOG`-controlled diagnostics on stderr. The TUI owns the terminal and
/// never installs a subscriber.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_render(args: RenderArgs) -> Result<(), AppError> {
    let client = crate::data::EurostatClient::from_env();
    let charts = select_charts(args.chart)?;

    // Strictly sequential, in catalog order; the first failure aborts the
    // remaining entries.
    for (idx, spec) in charts {
        let data = pipeline::run_chart(&client, spec)?;
        println!("{}", crate::report::format_chart_summary(idx, &data));
        println!("{}", crate::plot::render_ascii_chart(&data, args.width, args.height));
    }
    Ok(())
}

fn handle_list() -> Result<(), AppError> {
    print!("{}", crate::report::format_catalog(crate::config::CHARTS));
    Ok(())
}

fn select_charts(chart: Option<usize>) -> Result<Vec<(usize, &'static ChartSpec)>, AppError> {
    let catalog = crate::config::CHARTS;
    match chart {
        None => Ok(catalog.iter().enumerate().collect()),
        Some(idx) => {
            let spec = catalog.get(idx).ok_or_else(|| {
                AppError::config(format!(
                    "No chart #{idx}; the catalog has {} entries (see `esc list`).",
                    catalog.len()
                ))
            })?;
            Ok(vec![(idx, spec)])
        }
    }
}

/// Rewrite argv so `esc` defaults to `esc tui`.
///
/// Rules:
/// - `esc`                     -> `esc tui`
/// - `esc --chart 3 ...`       -> `esc tui --chart 3 ...`
/// - `esc --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "render" | "list" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_the_tui() {
        assert_eq!(rewrite_args(args(&["esc"])), args(&["esc", "tui"]));
        assert_eq!(
            rewrite_args(args(&["esc", "--chart", "3"])),
            args(&["esc", "tui", "--chart", "3"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["esc", "render"])),
            args(&["esc", "render"])
        );
        assert_eq!(
            rewrite_args(args(&["esc", "--help"])),
            args(&["esc", "--help"])
        );
    }

    #[test]
    fn select_charts_rejects_out_of_range_indices() {
        let err = select_charts(Some(crate::config::CHARTS.len())).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let all = select_charts(None).unwrap();
        assert_eq!(all.len(), crate::config::CHARTS.len());
    }
}
