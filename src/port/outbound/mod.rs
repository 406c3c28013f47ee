//! Ports the sampler drives.

pub mod market;
pub mod notifier;
pub mod store;
