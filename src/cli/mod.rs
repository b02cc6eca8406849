//! Command-line parsing.
//!
//! Argument parsing and command dispatch stay separate from the data
//! pipeline. The CLI chooses *which* catalog entries to show and how big the
//! plots are; chart content comes from the static catalog in `config`.

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "esc", version, about = "Eurostat macro indicator charts (Greece vs EU)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render catalog charts as terminal plots, in catalog order.
    Render(RenderArgs),
    /// Print the chart catalog.
    List,
    /// Launch the interactive chart viewer.
    ///
    /// Uses the same pipeline as `esc render`, but draws with Plotters inside
    /// a Ratatui terminal UI.
    Tui(TuiArgs),
}

/// Options for batch rendering.
#[derive(Debug, Parser, Clone)]
pub struct RenderArgs {
    /// Render only this catalog entry (see `esc list` for indices).
    #[arg(short = 'c', long)]
    pub chart: Option<usize>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for the interactive viewer.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Catalog entry to open first.
    #[arg(short = 'c', long, default_value_t = 0)]
    pub chart: usize,
}
