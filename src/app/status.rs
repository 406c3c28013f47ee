//! Console status line for a completed sample.
//!
//! `[14:05:09] INR 1,23,456.78 +12.34 / +0.56%`
//!
//! The change part is green for gains and red for losses when the terminal
//! supports color.

use chrono::NaiveTime;
use owo_colors::{OwoColorize, Stream};

use super::config::DisplayConfig;
use super::sampler::Sample;
use crate::domain::money::{grouped, signed};

/// Text shown in place of a percentage that cannot be computed.
pub const NO_PERCENT: &str = "N/A";

pub struct StatusLine<'a> {
    sample: &'a Sample,
    display: &'a DisplayConfig,
    at: NaiveTime,
}

impl<'a> StatusLine<'a> {
    pub fn new(sample: &'a Sample, display: &'a DisplayConfig, at: NaiveTime) -> Self {
        Self {
            sample,
            display,
            at,
        }
    }

    fn prefix(&self) -> String {
        format!(
            "[{}] {} {}",
            self.at.format("%H:%M:%S"),
            self.display.currency,
            grouped(self.sample.entry.total_worth, self.display.grouping)
        )
    }

    fn change(&self) -> String {
        let change = &self.sample.change;
        let percent = change
            .percent
            .map_or_else(|| NO_PERCENT.to_string(), |p| format!("{}%", signed(p)));
        format!("{} / {percent}", signed(change.delta))
    }

    /// The line without any terminal styling.
    #[must_use]
    pub fn plain(&self) -> String {
        format!("{} {}", self.prefix(), self.change())
    }

    /// The line with the change colored for stdout, if stdout supports it.
    #[must_use]
    pub fn styled(&self) -> String {
        let change = self.change();
        let change = if self.sample.change.is_loss() {
            change
                .if_supports_color(Stream::Stdout, |text| text.red())
                .to_string()
        } else {
            change
                .if_supports_color(Stream::Stdout, |text| text.green())
                .to_string()
        };
        format!("{} {change}", self.prefix())
    }
}
