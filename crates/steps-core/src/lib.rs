//! Shared building blocks for Step Insights.
//!
//! Holds the step-table models, the error type used by every crate in the
//! workspace, command-line settings, and the timestamp / number formatting
//! helpers the data and UI layers both rely on.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
