//! Reconciliation engine for per-guild configuration records.
//!
//! Takes an arbitrary, possibly stale or hostile configuration payload and a tenant
//! tier, and produces a complete record that satisfies the option schema and the
//! plan's capability table. Nothing here performs I/O; the service facade in the
//! `guildctl` crate wires the engine to its collaborators.
//!
//! - [`plan`]: tier to capability table
//! - [`schema`]: typed option descriptors and the frozen registry
//! - [`sanitize`]: the reconciliation pass
//! - [`domain`]: custom domain verification fields
//! - [`tokens`]: API token lifecycle on the record's token list
//! - [`signature`]: canonical digest for drift detection

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod domain;
pub mod order;
pub mod plan;
pub mod prelude;
pub mod record;
pub mod sanitize;
pub mod schema;
pub mod signature;
pub mod tokens;

pub use record::{ConfigRecord, OptionValue};
pub use sanitize::sanitize;
pub use schema::{default_registry, FrozenOptionRegistry};
pub use signature::signature;

// vim: ts=4
