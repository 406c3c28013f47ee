//! Application layer - configuration, the sampler and its scheduler.

pub mod config;
mod orchestrator;
pub mod sampler;
pub mod scheduler;
pub mod status;

pub use config::Config;
pub use orchestrator::{build_sampler, App};
pub use sampler::{Sample, Sampler, SamplerSettings, SamplerState};
