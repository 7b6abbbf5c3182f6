pub use guildctl_types::error::{ClResult, Error};
pub use guildctl_types::types::{Tier, TnId};

pub use tracing::{debug, info, warn};

// vim: ts=4
