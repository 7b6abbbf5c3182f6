//! guildctl - plan-aware configuration control surface.
//!
//! Wires the reconciliation engine in `guildctl-core` to its collaborators:
//! persistence, tier resolution, notifications and audit. Every entry point loads
//! the stored record, sanitizes it against the tenant's current tier, applies the
//! requested change and stores the full record back.
//!
//! ```ignore
//! let mut builder = AppBuilder::new();
//! builder
//!     .config_adapter(Arc::new(ConfigAdapterMemory::new()))
//!     .tier_resolver(Arc::new(TierResolverMemory::new(Tier::Free)));
//! let app = builder.build()?;
//! let snapshot = app.config.read(TnId(1)).await?;
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod notify;
pub mod prelude;
pub mod service;

pub use app::{App, AppBuilder, AppBuilderOpts, AppState};
pub use guildctl_core as engine;
pub use guildctl_types as types;
pub use service::{ConfigService, ConfigSnapshot, CreateTokenReq, TokenUpdate};

// vim: ts=4
