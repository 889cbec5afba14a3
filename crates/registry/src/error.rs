//! Error types for registry operations.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error produced by a [`Reader`](crate::Reader).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Recoverable registry failures.
///
/// Lifecycle violations (mutating an uninitialized registry) are not
/// represented here; they panic at the offending call.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// The reference is the invalid sentinel or outside the table.
	#[error("{registry}: invalid reference (raw {raw})")]
	InvalidReference {
		/// Label of the registry that rejected the reference.
		registry: &'static str,
		/// Raw value of the rejected reference.
		raw: u32,
	},

	/// The reader could not produce a record.
	#[error("{registry}: failed to read {}: {error}", path.display())]
	Read {
		/// Label of the registry that drove the read.
		registry: &'static str,
		/// Resolved source path.
		path: PathBuf,
		/// The reader's error.
		#[source]
		error: BoxError,
	},

	/// Every slot is occupied.
	#[error("{registry}: all {capacity} slots are occupied")]
	CapacityExhausted {
		/// Label of the full registry.
		registry: &'static str,
		/// Slot count of the registry.
		capacity: usize,
	},

	/// The reference addresses an empty slot.
	#[error("{registry}: slot {raw} is not loaded")]
	NotLoaded {
		/// Label of the registry.
		registry: &'static str,
		/// Raw value of the empty reference.
		raw: u32,
	},
}

/// Result type for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
