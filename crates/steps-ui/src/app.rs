//! Chart display loop.
//!
//! [`ChartDisplay`] is the seam between the pipeline and the screen: the
//! terminal implementation takes over the alternate screen for one chart at a
//! time, while [`HeadlessDisplay`] only logs what would have been shown.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use steps_core::error::{Result, StepsError};
use steps_core::formatting::format_steps;
use steps_data::analysis::StepAnalysis;

use crate::charts::{self, StepChart};
use crate::themes::Theme;

// ── Dismissal ─────────────────────────────────────────────────────────────────

/// How the user closed a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    /// Move on to the next chart.
    Next,
    /// Close this chart and skip the ones still queued.
    SkipRest,
}

/// Map a key press to a dismissal, `None` for keys that keep the chart open.
pub fn key_action(key: KeyEvent) -> Option<Dismissal> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Dismissal::SkipRest)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter => {
            Some(Dismissal::Next)
        }
        KeyCode::Char(' ') => Some(Dismissal::Next),
        _ => None,
    }
}

// ── ChartDisplay ──────────────────────────────────────────────────────────────

/// Something that can present the step charts.
pub trait ChartDisplay {
    /// Present `chart` and block until it is dismissed.
    fn show(&mut self, chart: StepChart, analysis: &StepAnalysis) -> Result<Dismissal>;

    /// Present every chart in display order. Returns how many were shown.
    fn show_all(&mut self, analysis: &StepAnalysis) -> Result<usize> {
        let mut shown = 0;
        for chart in StepChart::ALL {
            let dismissal = self.show(chart, analysis)?;
            shown += 1;
            if dismissal == Dismissal::SkipRest {
                info!("Remaining charts skipped after {}", chart.title());
                break;
            }
        }
        Ok(shown)
    }
}

// ── TerminalDisplay ───────────────────────────────────────────────────────────

/// Full-screen chart viewer on the controlling terminal.
pub struct TerminalDisplay {
    theme: Theme,
}

impl TerminalDisplay {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
        }
    }

    /// Draw `chart` until a dismissing key arrives. Redraws on resize.
    fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        chart: StepChart,
        analysis: &StepAnalysis,
    ) -> Result<Dismissal> {
        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                charts::render_chart(frame, area, chart, analysis, &self.theme);
            })?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(dismissal) = key_action(key) {
                        return Ok(dismissal);
                    }
                }
                _ => {}
            }
        }
    }
}

impl ChartDisplay for TerminalDisplay {
    fn show(&mut self, chart: StepChart, analysis: &StepAnalysis) -> Result<Dismissal> {
        if !io::stdout().is_terminal() {
            return Err(StepsError::Terminal(
                "stdout is not a terminal; rerun with --headless".to_string(),
            ));
        }
        debug!("Showing chart: {}", chart.title());

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let outcome = self.event_loop(&mut terminal, chart, analysis);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        outcome
    }
}

// ── HeadlessDisplay ───────────────────────────────────────────────────────────

/// Display that never touches the terminal; charts are logged and skipped.
#[derive(Debug, Default)]
pub struct HeadlessDisplay;

impl ChartDisplay for HeadlessDisplay {
    fn show(&mut self, chart: StepChart, analysis: &StepAnalysis) -> Result<Dismissal> {
        info!(
            "Headless: skipping '{}' ({} steps, {} days, {} months)",
            chart.title(),
            format_steps(analysis.metadata.total_steps),
            analysis.daily.len(),
            analysis.monthly.len()
        );
        Ok(Dismissal::Next)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
