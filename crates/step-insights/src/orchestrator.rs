//! End-to-end step analysis workflow.
//!
//! Runs load → extract → normalize → aggregate on one export, announcing each
//! stage on `out`, then hands the finished tables to a [`ChartDisplay`].
//! Nothing is shown unless every stage before it succeeded.

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use steps_core::error::Result;
use steps_core::formatting::format_steps;
use steps_data::analysis::{analyze_steps, StepAnalysis};
use steps_data::extractor::extract_step_rows;
use steps_data::loader::load_document;
use steps_data::normalizer::normalize;
use steps_ui::app::ChartDisplay;

// ── Progress lines ────────────────────────────────────────────────────────────

pub const PROGRESS_LOADING: &str = "Loading and parsing XML data.";
pub const PROGRESS_EXTRACTING: &str = "Extracting relevant step count data.";
pub const PROGRESS_CLEANING: &str = "Cleaning, processing the data.";
pub const PROGRESS_VISUALIZING: &str = "Generating visual insights.";
pub const PROGRESS_DONE: &str = "The visualizations and other processes are done.";

// ── Workflow ──────────────────────────────────────────────────────────────────

/// Analyse the export at `path` and present its charts on `display`.
///
/// Progress lines go to `out`. The first failing stage aborts the run and its
/// error is returned unchanged.
pub fn execute_analysis_workflow(
    path: &Path,
    display: &mut dyn ChartDisplay,
    out: &mut impl Write,
) -> Result<StepAnalysis> {
    let started = Instant::now();
    info!("Analysing {}", path.display());

    writeln!(out, "{PROGRESS_LOADING}")?;
    let document = load_document(path)?;
    debug!("Parsed document in {:?}", started.elapsed());

    writeln!(out, "{PROGRESS_EXTRACTING}")?;
    let rows = extract_step_rows(&document)?;
    drop(document);

    writeln!(out, "{PROGRESS_CLEANING}")?;
    let steps = normalize(&rows)?;
    let analysis = analyze_steps(&steps)?;
    info!(
        "{} steps over {} days in {} months",
        format_steps(analysis.metadata.total_steps),
        analysis.metadata.days_covered,
        analysis.metadata.months_covered
    );
    debug!("Pipeline tables ready in {:?}", started.elapsed());

    writeln!(out, "{PROGRESS_VISUALIZING}")?;
    let shown = display.show_all(&analysis)?;
    info!("{shown} chart(s) presented");

    writeln!(out, "{PROGRESS_DONE}")?;
    out.flush()?;
    debug!("Workflow finished in {:?}", started.elapsed());

    Ok(analysis)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
