//! Referee test support utilities
//!
//! This crate provides utilities for referee integration tests: unified
//! logging initialization and a stub HTTP agent server.

pub mod logging;
pub mod stub_agent;
