//! Terminal chart layer for Step Insights.
//!
//! Provides themes, the four step charts drawn with [`ratatui`], and the
//! blocking display that shows them one at a time.

pub mod app;
pub mod charts;
pub mod themes;
