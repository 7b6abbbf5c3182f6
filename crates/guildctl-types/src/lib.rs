//! Shared types, collaborator traits, and core utilities for guildctl.
//!
//! This crate holds the foundational types that are shared between the
//! reconciliation engine, the service facade and every adapter implementation.
//! Keeping them separate lets adapter crates compile without pulling in the
//! engine itself.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod config_adapter;
pub mod error;
pub mod hasher;
pub mod notify_adapter;
pub mod prelude;
pub mod types;
pub mod utils;

// vim: ts=4
