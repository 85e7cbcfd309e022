use clap::Parser;
use std::path::PathBuf;

/// Default location of the health export, relative to the working directory.
pub const DEFAULT_INPUT: &str = "dataset.xml";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Step-count insights from a health-data XML export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "step-insights",
    about = "Step-count insights from a health-data XML export",
    version
)]
pub struct Settings {
    /// Health export to analyse
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Run the pipeline without opening chart windows
    #[arg(long)]
    pub headless: bool,

    /// Print the daily and monthly tables as JSON when done
    #[arg(long)]
    pub dump_json: bool,
}

impl Settings {
    /// Parse the process arguments and apply flag overrides.
    pub fn load() -> Self {
        Self::from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
