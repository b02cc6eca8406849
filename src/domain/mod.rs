//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - parsed upstream tables (`WideTable`, `LongTable`)
//! - plot-ready observations and series (`Observation`, `Series`)
//! - static chart configuration (`ChartSpec`, `ChartKind`, `ValueFormat`)
//! - styling passed explicitly into renderers (`Palette`, `Rgb`)

pub mod types;

pub use types::*;
