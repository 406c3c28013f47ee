//! Message formatting for webhook notifications.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::notifier::WebhookConfig;
use crate::domain::money::{grouped, round_cents, signed};
use crate::port::Event;

/// Upper bound on bar symbols in one message.
pub const MAX_BAR: usize = 40;

/// Percentage covered by one bar symbol.
const BAR_STEP: Decimal = dec!(0.25);

/// Number of bar symbols for a move of `percent`.
///
/// One symbol per full quarter percent, minus one, never negative.
#[must_use]
pub fn bar_length(percent: Decimal) -> usize {
    let steps = percent
        .abs()
        .checked_div(BAR_STEP)
        .and_then(|s| s.floor().to_usize())
        .unwrap_or(usize::MAX);
    steps.saturating_sub(1).min(MAX_BAR)
}

/// Format an event into a webhook message, or None if the event should be skipped.
pub fn format_event_message(event: &Event, config: &WebhookConfig) -> Option<String> {
    match event {
        Event::ValuationMoved(e) => {
            let (emoji, heading, block) = if e.is_loss() {
                ("📉", "Portfolio down", "🔴")
            } else {
                ("📈", "Portfolio up", "🟢")
            };

            let mut lines = vec![format!("{emoji} {heading} {}%", signed(e.percent))];
            let bar = block.repeat(bar_length(e.percent));
            if !bar.is_empty() {
                lines.push(bar);
            }
            lines.push(format!("Δ {} {}", signed(e.delta), config.currency));
            lines.push(format!(
                "💰 {} {}",
                config.currency,
                grouped(round_cents(e.total_worth), config.grouping)
            ));

            Some(lines.join("\n"))
        }
        Event::CycleFailed { reason } if config.notify_failures => {
            Some(format!("⚠️ Valuation sampling failed\n{reason}"))
        }
        Event::CycleFailed { .. } => None,
    }
}
