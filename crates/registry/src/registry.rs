//! Fixed-capacity resource registry.
//!
//! # Mental model
//!
//! * A registry owns `R::CAPACITY` slots, one [`Reader`] and a [`Lifecycle`].
//! * `load` is an upsert: an occupied slot is unloaded before the reader runs,
//!   so a failed read leaves the slot empty rather than holding stale data.
//! * Reads on invalid or empty references degrade to `None`/`false`.
//!
//! # Lifecycle
//!
//! 1. [`ResourceRegistry::new`] allocates storage; the registry starts
//!    [`Lifecycle::Uninitialized`].
//! 2. [`ResourceRegistry::initialize`] clears all slots and enables mutation.
//! 3. [`ResourceRegistry::uninitialize`] drops every record. The registry stays
//!    usable and can be initialized again.
//!
//! Mutating an uninitialized registry is a caller bug and panics.

use std::path::{Path, PathBuf};

use crate::error::{RegistryError, Result};
use crate::{Reader, RegistryConfig, SlotRef, SlotTable};

/// Lifecycle state of a [`ResourceRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
	/// Storage exists but mutation is not allowed.
	#[default]
	Uninitialized,
	/// Ready for load/unload.
	Initialized,
}

/// A loaded record and the resolved path it came from.
#[derive(Debug)]
struct Loaded<T> {
	record: T,
	source: PathBuf,
}

/// Outcome of [`ResourceRegistry::load_all`].
#[derive(Debug)]
pub struct LoadReport<R> {
	/// References loaded successfully, in request order.
	pub loaded: Vec<R>,
	/// References that failed, with the reason.
	pub failed: Vec<(R, RegistryError)>,
}

impl<R> LoadReport<R> {
	/// Returns true if every requested load succeeded.
	pub fn is_complete(&self) -> bool {
		self.failed.is_empty()
	}
}

impl<R> Default for LoadReport<R> {
	fn default() -> Self {
		Self {
			loaded: Vec::new(),
			failed: Vec::new(),
		}
	}
}

/// Maps bounded references to records produced by a [`Reader`].
pub struct ResourceRegistry<T, R: SlotRef, Rd> {
	label: &'static str,
	reader: Rd,
	config: RegistryConfig,
	slots: SlotTable<Loaded<T>, R>,
	state: Lifecycle,
}

impl<T, R: SlotRef, Rd: Reader<T>> ResourceRegistry<T, R, Rd> {
	/// Creates an uninitialized registry.
	pub fn new(label: &'static str, reader: Rd) -> Self {
		Self::with_config(label, reader, RegistryConfig::default())
	}

	/// Creates an uninitialized registry resolving sources through `config`.
	pub fn with_config(label: &'static str, reader: Rd, config: RegistryConfig) -> Self {
		Self {
			label,
			reader,
			config,
			slots: SlotTable::new(),
			state: Lifecycle::Uninitialized,
		}
	}

	/// Returns the diagnostic label.
	#[inline]
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns the bound reader.
	#[inline]
	pub fn reader(&self) -> &Rd {
		&self.reader
	}

	/// Returns the path resolution settings.
	#[inline]
	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Returns the current lifecycle state.
	#[inline]
	pub fn lifecycle(&self) -> Lifecycle {
		self.state
	}

	/// Returns true between `initialize` and `uninitialize`.
	#[inline]
	pub fn is_initialized(&self) -> bool {
		self.state == Lifecycle::Initialized
	}

	/// Returns the slot count.
	#[inline]
	pub fn capacity(&self) -> usize {
		R::CAPACITY
	}

	/// Returns the number of loaded records.
	#[inline]
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Returns true if nothing is loaded.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Clears all slots and enables mutation.
	///
	/// No-op if already initialized; loaded records survive. Use
	/// [`ResourceRegistry::reset`] to clear an initialized registry.
	pub fn initialize(&mut self) {
		if self.is_initialized() {
			tracing::trace!(registry = self.label, "registry.initialize.noop");
			return;
		}
		self.slots.clear_all();
		self.state = Lifecycle::Initialized;
		tracing::debug!(registry = self.label, capacity = R::CAPACITY, "registry.initialize");
	}

	/// Drops every record and disables mutation. Safe to call repeatedly.
	pub fn uninitialize(&mut self) {
		let dropped = self.slots.len();
		self.slots.clear_all();
		if self.state == Lifecycle::Initialized {
			tracing::debug!(registry = self.label, dropped, "registry.uninitialize");
		}
		self.state = Lifecycle::Uninitialized;
	}

	/// Loads the record at `source` into `r`, replacing any previous record.
	///
	/// On reader failure the slot is left empty.
	///
	/// # Panics
	///
	/// Panics if the registry is not initialized.
	pub fn load(&mut self, r: R, source: impl AsRef<Path>) -> Result<&T> {
		self.assert_initialized("load");
		let path = self.config.resolve(source.as_ref());
		self.load_resolved(r, path)
	}

	/// Loads `source` into the lowest free slot and returns its reference.
	///
	/// # Panics
	///
	/// Panics if the registry is not initialized.
	pub fn load_free(&mut self, source: impl AsRef<Path>) -> Result<R> {
		self.assert_initialized("load_free");
		let r = self.find_free_reference().ok_or(RegistryError::CapacityExhausted {
			registry: self.label,
			capacity: R::CAPACITY,
		})?;
		self.load(r, source)?;
		Ok(r)
	}

	/// Loads each `(reference, source)` pair, continuing past failures.
	///
	/// # Panics
	///
	/// Panics if the registry is not initialized.
	pub fn load_all<I, P>(&mut self, entries: I) -> LoadReport<R>
	where
		I: IntoIterator<Item = (R, P)>,
		P: AsRef<Path>,
	{
		self.assert_initialized("load_all");
		let mut report = LoadReport::default();
		for (r, source) in entries {
			match self.load(r, source) {
				Ok(_) => report.loaded.push(r),
				Err(err) => report.failed.push((r, err)),
			}
		}
		tracing::debug!(
			registry = self.label,
			loaded = report.loaded.len(),
			failed = report.failed.len(),
			"registry.load_all"
		);
		report
	}

	/// Re-reads the record at `r` from the source it was loaded from.
	///
	/// # Panics
	///
	/// Panics if the registry is not initialized.
	pub fn reload(&mut self, r: R) -> Result<&T> {
		self.assert_initialized("reload");
		if !r.is_valid() {
			return Err(self.invalid(r));
		}
		let Some(path) = self.slots.get(r).map(|l| l.source.clone()) else {
			return Err(RegistryError::NotLoaded {
				registry: self.label,
				raw: r.raw(),
			});
		};
		self.load_resolved(r, path)
	}

	/// Drops the record at `r`. Returns true if a record was dropped.
	///
	/// Invalid and empty references are a no-op.
	///
	/// # Panics
	///
	/// Panics if the registry is not initialized.
	pub fn unload(&mut self, r: R) -> bool {
		self.assert_initialized("unload");
		let dropped = self.slots.clear(r).is_some();
		if dropped {
			tracing::debug!(registry = self.label, slot = r.raw(), "registry.unload");
		}
		dropped
	}

	/// Alias for [`ResourceRegistry::unload`].
	#[inline]
	pub fn release(&mut self, r: R) -> bool {
		self.unload(r)
	}

	/// Drops every record while staying initialized.
	///
	/// # Panics
	///
	/// Panics if the registry is not initialized.
	pub fn reset(&mut self) {
		self.assert_initialized("reset");
		let dropped = self.slots.len();
		self.slots.clear_all();
		tracing::debug!(registry = self.label, dropped, "registry.reset");
	}

	/// Returns true if `r` is valid and loaded.
	#[inline]
	pub fn is_loaded(&self, r: R) -> bool {
		self.slots.occupied(r)
	}

	/// Returns the record at `r`, if loaded.
	#[inline]
	pub fn get(&self, r: R) -> Option<&T> {
		self.slots.get(r).map(|l| &l.record)
	}

	/// Returns the resolved path the record at `r` was loaded from.
	#[inline]
	pub fn source_of(&self, r: R) -> Option<&Path> {
		self.slots.get(r).map(|l| l.source.as_path())
	}

	/// Returns the lowest unoccupied reference, or `None` when full.
	pub fn find_free_reference(&self) -> Option<R> {
		self.slots.first_free()
	}

	/// Iterates loaded records in ascending reference order.
	pub fn iter(&self) -> impl Iterator<Item = (R, &T)> + '_ {
		self.slots.iter().map(|(r, l)| (r, &l.record))
	}

	fn load_resolved(&mut self, r: R, path: PathBuf) -> Result<&T> {
		let label = self.label;
		if !r.is_valid() {
			tracing::trace!(registry = label, raw = r.raw(), "registry.load.invalid_ref");
			return Err(self.invalid(r));
		}
		if self.slots.clear(r).is_some() {
			tracing::trace!(registry = label, slot = r.raw(), "registry.load.replace");
		}

		let record = match self.reader.read(&path) {
			Ok(record) => record,
			Err(error) => {
				tracing::debug!(
					registry = label,
					slot = r.raw(),
					path = %path.display(),
					%error,
					"registry.load.failed"
				);
				return Err(RegistryError::Read {
					registry: label,
					path,
					error: Box::new(error),
				});
			}
		};

		tracing::debug!(registry = label, slot = r.raw(), path = %path.display(), "registry.load");
		// The `Err` arm is unreachable: `r` was validated above and `set` only
		// rejects out-of-range references.
		match self.slots.set(r, Loaded { record, source: path }) {
			Ok(loaded) => Ok(&loaded.record),
			Err(_) => Err(RegistryError::InvalidReference {
				registry: label,
				raw: r.raw(),
			}),
		}
	}

	fn invalid(&self, r: R) -> RegistryError {
		RegistryError::InvalidReference {
			registry: self.label,
			raw: r.raw(),
		}
	}

	#[track_caller]
	fn assert_initialized(&self, op: &'static str) {
		assert!(
			self.is_initialized(),
			"{}: `{op}` called on an uninitialized registry",
			self.label
		);
	}
}

impl<T, R: SlotRef, Rd> core::fmt::Debug for ResourceRegistry<T, R, Rd> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ResourceRegistry")
			.field("label", &self.label)
			.field("capacity", &R::CAPACITY)
			.field("loaded", &self.slots.len())
			.field("state", &self.state)
			.finish()
	}
}
