pub use guildctl_types::error::{ClResult, Error};
pub use guildctl_types::types::{Tier, TnId};

pub use crate::app::App;

pub use tracing::{debug, error, info, warn};

// vim: ts=4
