//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │        Sampler          │
//!                    │   (domain + ports)      │
//!     ┌──────────────┤                         ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Market  │            │   Store     │              │ Notifier  │
//! │   API   │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! - [`MarketApi`] - portfolio holdings and sell-price quotes
//! - [`Store`] - latest portfolio snapshot and the append-only valuation log
//! - [`Notifier`] - fire-and-forget alerts

pub mod outbound;

pub use outbound::market::MarketApi;
pub use outbound::notifier::{Event, LogNotifier, MoveEvent, Notifier, NotifierRegistry, NullNotifier};
pub use outbound::store::Store;
