mod bootstrap;
mod orchestrator;

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use steps_core::models::{DailyTotal, MonthlyTotal};
use steps_core::settings::Settings;
use steps_ui::app::{ChartDisplay, HeadlessDisplay, TerminalDisplay};

/// Tables printed by `--dump-json`.
#[derive(Serialize)]
struct TableDump<'a> {
    daily: &'a [DailyTotal],
    monthly: &'a [MonthlyTotal],
}

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Step Insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, Theme: {}, Headless: {}",
        settings.input.display(),
        settings.theme,
        settings.headless
    );

    let mut display: Box<dyn ChartDisplay> = if settings.headless {
        Box::new(HeadlessDisplay)
    } else {
        Box::new(TerminalDisplay::new(&settings.theme))
    };

    let mut out = io::stdout();
    let analysis =
        orchestrator::execute_analysis_workflow(&settings.input, display.as_mut(), &mut out)?;

    if settings.dump_json {
        let dump = TableDump {
            daily: &analysis.daily,
            monthly: &analysis.monthly,
        };
        serde_json::to_writer_pretty(&mut out, &dump)?;
        writeln!(out)?;
    }

    tracing::info!(
        "Done: {} days across {} months",
        analysis.metadata.days_covered,
        analysis.metadata.months_covered
    );

    Ok(())
}
