//! Integration flows.

#[cfg(test)]
pub mod fixtures;

mod handbrake;
mod persistence;
mod spork_flows;
