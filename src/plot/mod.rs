//! Terminal chart rendering outside the TUI.

pub mod ascii;

pub use ascii::render_ascii_chart;
