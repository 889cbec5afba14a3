//! Error types for the profile system.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading profile configuration.
#[derive(Debug, Error)]
pub enum ProfileError {
	/// The configuration file could not be read.
	#[error("I/O error reading {}: {error}", path.display())]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		#[source]
		error: std::io::Error,
	},

	/// The configuration is not valid TOML or does not match the schema.
	#[error("invalid profile config: {0}")]
	Config(#[from] toml::de::Error),

	/// A manifest entry names a slot outside the registry.
	#[error("{registry}: manifest slot {slot} exceeds capacity {capacity}")]
	SlotOutOfRange {
		/// Registry the entry targets.
		registry: &'static str,
		/// Requested slot.
		slot: u32,
		/// Registry capacity.
		capacity: usize,
	},

	/// Two manifest entries target the same slot.
	#[error("{registry}: manifest slot {slot} is listed more than once")]
	DuplicateSlot {
		/// Registry the entries target.
		registry: &'static str,
		/// Repeated slot.
		slot: u32,
	},
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
