//! Test modules for the scan workflow
//!
//! Orchestrator tests run against a scripted service so every path through
//! the state machine can be exercised without a network.

pub mod helpers;
