//! Data pipeline for Step Insights.
//!
//! Loads a health-data XML export, extracts its step-count records,
//! normalizes their timestamps and aggregates them into the daily and monthly
//! tables the charts are drawn from.

pub mod aggregator;
pub mod analysis;
pub mod extractor;
pub mod loader;
pub mod normalizer;
pub mod stats;

