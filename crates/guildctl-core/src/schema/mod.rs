//! Option schema registry

pub mod options;
pub mod types;

pub use options::{default_registry, keys, register_options};
pub use types::{
	FrozenOptionRegistry, OptionDescriptor, OptionDescriptorBuilder, OptionKind, OptionRegistry,
	PlanLimit, SelectChoice,
};

// vim: ts=4
