//! Common test utilities and helpers
//!
//! Integration tests drive the real HTTP client, so they need something to
//! talk to: a canned-response server and a few fixtures.

#![allow(dead_code)]

pub mod canned_server;
pub mod fixtures;
