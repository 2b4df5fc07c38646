//! Interactive prompts with validation loops.
//!
//! Every question re-asks until it gets an accepted answer. The only way out
//! of a loop other than a valid answer is end of input, reported as
//! [`InputClosed`].

use anyhow::Result;
use chrono::{Month, Weekday};
use std::fmt;
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::config::{City, CityRegistry};
use crate::filter::{
    Choice, SELECTABLE_MONTHS, Selection, month_name, parse_city_choice, parse_day_choice,
    parse_month_choice,
};
use crate::output::title_case;

/// Standard input reached end-of-file while a prompt was waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClosed;

impl fmt::Display for InputClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("input closed")
    }
}

impl std::error::Error for InputClosed {}

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `question` and returns the trimmed answer.
    ///
    /// Undecodable input comes back as an empty answer so callers treat it
    /// like any other unrecognised reply.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Err(InputClosed.into()),
            Ok(_) => Ok(line.trim().to_string()),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                debug!(error = %e, "Discarding undecodable answer");
                Ok(String::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Repeats `question` until `parse` accepts the answer.
    fn ask_until<T>(
        &mut self,
        question: &str,
        hint: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            debug!(answer = %answer, "Rejected answer");
            writeln!(self.output, "        ---->>  Valid input:  {hint}")?;
        }
    }

    /// Shows the numbered city menu and returns the chosen city.
    pub fn choose_city(&mut self, registry: &CityRegistry) -> Result<City> {
        for (idx, city) in registry.iter().enumerate() {
            writeln!(self.output, "{:>20}. {}", idx + 1, title_case(&city.name))?;
        }

        let count = registry.len();
        let question = format!("\n    Enter a number for the city (1 - {count}):  ");
        let hint = format!("1 - {count}");
        let index = self.ask_until(&question, &hint, |answer| parse_city_choice(answer, count))?;

        registry
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("city #{} is not configured", index + 1))
    }

    pub fn choose_month(&mut self) -> Result<Choice<Month>> {
        let question = format!(
            "    Enter the month with January=1, {}={} or \"a\" for all:  ",
            month_name(u32::from(SELECTABLE_MONTHS)).unwrap_or_default(),
            SELECTABLE_MONTHS
        );
        let hint = format!("1 - {SELECTABLE_MONTHS}, a");
        self.ask_until(&question, &hint, parse_month_choice)
    }

    pub fn choose_day(&mut self) -> Result<Choice<Weekday>> {
        self.ask_until(
            "    Enter the day with Monday=1, Sunday=7 or \"a\" for all:  ",
            "1 - 7, a",
            parse_day_choice,
        )
    }

    /// Runs the city, month and day prompts in order.
    pub fn select(&mut self, registry: &CityRegistry) -> Result<Selection> {
        let city = self.choose_city(registry)?;
        let month = self.choose_month()?;
        let day = self.choose_day()?;
        Ok(Selection { city, month, day })
    }

    /// Returns `true` only for an explicit "yes" (or "y").
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?;
        Ok(answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y"))
    }
}
