//! Interactive session loop: select, load, filter, report, page, restart.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{error, info};

use crate::analyzers::{duration, stations, summary, travel, users};
use crate::config::CityRegistry;
use crate::filter;
use crate::loader::{self, Dataset};
use crate::output::{self, PAGE_SIZE, Pager};
use crate::prompt::{InputClosed, Prompter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Done,
}

/// Drives report cycles until the user declines to restart.
///
/// Nothing is carried from one iteration to the next; every cycle reloads
/// the city file.
pub struct Session<'a, R, W> {
    registry: &'a CityRegistry,
    prompter: Prompter<R, W>,
    state: SessionState,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(registry: &'a CityRegistry, prompter: Prompter<R, W>) -> Self {
        Self {
            registry,
            prompter,
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Runs iterations until the session is done. End of input ends the
    /// session cleanly.
    pub fn run(&mut self) -> Result<()> {
        let mut iteration = 0usize;

        while self.state == SessionState::Running {
            iteration += 1;
            let span = tracing::info_span!("iteration", iteration);
            let _enter = span.enter();

            match self.step() {
                Ok(next) => self.state = next,
                Err(e) if e.is::<InputClosed>() => {
                    info!("Input closed, ending session");
                    self.state = SessionState::Done;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// One full cycle followed by the restart question.
    fn step(&mut self) -> Result<SessionState> {
        self.run_iteration()?;

        let restart = self
            .prompter
            .confirm("\n    Would you like to restart? (yes or no):  ")?;
        Ok(if restart {
            SessionState::Running
        } else {
            SessionState::Done
        })
    }

    fn run_iteration(&mut self) -> Result<()> {
        output::print_banner(self.prompter.output())?;
        let selection = self.prompter.select(self.registry)?;
        info!(
            city = %selection.city.name,
            month = %selection.month,
            day = %selection.day,
            "Selection made"
        );

        let started = Instant::now();
        let dataset = match loader::load_city(&selection.city) {
            Ok(dataset) => dataset,
            Err(e) => {
                error!(
                    city = %selection.city.name,
                    error = %format!("{e:#}"),
                    "Failed to load city data"
                );
                writeln!(
                    self.prompter.output(),
                    "\n  Could not load data for {}: {e:#}",
                    output::title_case(&selection.city.name)
                )?;
                return Ok(());
            }
        };
        let total_rides = dataset.len();
        let filtered = filter::apply(&dataset, &selection);
        drop(dataset);

        let out = self.prompter.output();
        output::print_elapsed(out, started)?;

        let started = Instant::now();
        let overview = summary::summarize(total_rides, &filtered.trips);
        output::print_summary(out, &selection, &overview)?;
        output::print_elapsed(out, started)?;

        let started = Instant::now();
        output::print_travel_times(out, travel::travel_times(&filtered.trips).as_ref())?;
        output::print_elapsed(out, started)?;

        let started = Instant::now();
        output::print_stations(out, stations::station_stats(&filtered.trips).as_ref())?;
        output::print_elapsed(out, started)?;

        let started = Instant::now();
        output::print_durations(out, duration::duration_stats(&filtered.trips).as_ref())?;
        output::print_elapsed(out, started)?;

        let started = Instant::now();
        output::print_users(out, users::user_stats(&filtered).as_ref())?;
        output::print_elapsed(out, started)?;

        self.page_raw_rows(&filtered)
    }

    /// Shows raw rows five at a time for as long as the user says yes.
    fn page_raw_rows(&mut self, dataset: &Dataset) -> Result<()> {
        writeln!(
            self.prompter.output(),
            "\n    Would you like to see the raw data from the current dataset?"
        )?;

        let mut pager = Pager::new(dataset.len(), PAGE_SIZE);
        while self.prompter.confirm("      (yes or no):  ")? {
            let out = self.prompter.output();
            let Some(range) = pager.next_page() else {
                writeln!(out, "\n    No rows to display.")?;
                break;
            };

            writeln!(out, "\n    Displaying rows {} to {}:\n", range.start + 1, range.end)?;
            output::print_rows(out, dataset, range)?;
            output::print_line(out, '.')?;

            if pager.is_exhausted() {
                writeln!(out, "\n    End of the filtered data.")?;
                break;
            }
            writeln!(out, "\n    Display the next {PAGE_SIZE} rows?")?;
        }

        Ok(())
    }
}
