//! Fixed-rate timer driving the sampler.
//!
//! The first cycle runs immediately, then one per period measured from the
//! start, not from the end of the previous cycle. Cycles run inline, so a tick
//! that elapses while a cycle is still running is skipped instead of
//! overlapping it.

use std::time::Duration;

use chrono::Local;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

use super::config::DisplayConfig;
use super::sampler::{Sample, Sampler};
use super::status::StatusLine;
use crate::error::{Error, Result};

/// Run cycles forever.
pub async fn run(sampler: &Sampler, period: Duration, display: &DisplayConfig) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(period_secs = period.as_secs(), "Sampling started");

    loop {
        ticker.tick().await;
        // Errors are logged inside; the next tick tries again.
        let _ = run_cycle(sampler, display).await;
    }
}

/// Run one cycle and print its status line.
pub async fn run_cycle(sampler: &Sampler, display: &DisplayConfig) -> Result<Sample> {
    match sampler.sample().await {
        Ok(sample) => {
            let line = StatusLine::new(&sample, display, Local::now().time());
            println!("{}", line.styled());
            Ok(sample)
        }
        Err(Error::CycleInProgress) => {
            warn!("Previous cycle still running, skipping tick");
            Err(Error::CycleInProgress)
        }
        Err(e) => {
            error!(error = %e, network = e.is_network(), "Sampling cycle failed");
            sampler.report_failure(&e);
            Err(e)
        }
    }
}
