//! Thread-safe registry handle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;
use crate::{LoadReport, Reader, ResourceRegistry, SlotRef};

/// Shared ownership of one [`ResourceRegistry`] behind a reader-writer lock.
///
/// Clones share the same registry. Mutations take the write lock for their
/// whole duration, including the reader call inside `load`, so replacing a
/// record is atomic with respect to other handles.
///
/// Guards returned by [`SharedRegistry::get`] hold the read lock. Drop them
/// before mutating through any handle on the same thread.
pub struct SharedRegistry<T, R: SlotRef, Rd> {
	inner: Arc<RwLock<ResourceRegistry<T, R, Rd>>>,
}

impl<T, R: SlotRef, Rd> Clone for SharedRegistry<T, R, Rd> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T, R: SlotRef, Rd: Reader<T>> SharedRegistry<T, R, Rd> {
	/// Wraps `registry` for shared use.
	pub fn new(registry: ResourceRegistry<T, R, Rd>) -> Self {
		Self {
			inner: Arc::new(RwLock::new(registry)),
		}
	}

	/// See [`ResourceRegistry::initialize`].
	pub fn initialize(&self) {
		self.inner.write().initialize();
	}

	/// See [`ResourceRegistry::uninitialize`].
	pub fn uninitialize(&self) {
		self.inner.write().uninitialize();
	}

	/// See [`ResourceRegistry::load`].
	pub fn load(&self, r: R, source: impl AsRef<Path>) -> Result<()> {
		self.inner.write().load(r, source).map(|_| ())
	}

	/// See [`ResourceRegistry::load_free`].
	pub fn load_free(&self, source: impl AsRef<Path>) -> Result<R> {
		self.inner.write().load_free(source)
	}

	/// See [`ResourceRegistry::load_all`].
	pub fn load_all<I, P>(&self, entries: I) -> LoadReport<R>
	where
		I: IntoIterator<Item = (R, P)>,
		P: AsRef<Path>,
	{
		self.inner.write().load_all(entries)
	}

	/// See [`ResourceRegistry::reload`].
	pub fn reload(&self, r: R) -> Result<()> {
		self.inner.write().reload(r).map(|_| ())
	}

	/// See [`ResourceRegistry::unload`].
	pub fn unload(&self, r: R) -> bool {
		self.inner.write().unload(r)
	}

	/// See [`ResourceRegistry::release`].
	pub fn release(&self, r: R) -> bool {
		self.inner.write().release(r)
	}

	/// See [`ResourceRegistry::reset`].
	pub fn reset(&self) {
		self.inner.write().reset();
	}

	/// See [`ResourceRegistry::is_loaded`].
	pub fn is_loaded(&self, r: R) -> bool {
		self.inner.read().is_loaded(r)
	}

	/// Returns a read guard over the record at `r`, if loaded.
	pub fn get(&self, r: R) -> Option<MappedRwLockReadGuard<'_, T>> {
		RwLockReadGuard::try_map(self.inner.read(), |reg| reg.get(r)).ok()
	}

	/// Runs `f` against the record at `r` without exposing the guard.
	pub fn with<U>(&self, r: R, f: impl FnOnce(&T) -> U) -> Option<U> {
		self.inner.read().get(r).map(f)
	}

	/// Returns a clone of the record at `r`.
	pub fn get_cloned(&self, r: R) -> Option<T>
	where
		T: Clone,
	{
		self.with(r, T::clone)
	}

	/// See [`ResourceRegistry::source_of`].
	pub fn source_of(&self, r: R) -> Option<PathBuf> {
		self.inner.read().source_of(r).map(Path::to_path_buf)
	}

	/// See [`ResourceRegistry::find_free_reference`].
	pub fn find_free_reference(&self) -> Option<R> {
		self.inner.read().find_free_reference()
	}

	/// See [`ResourceRegistry::is_initialized`].
	pub fn is_initialized(&self) -> bool {
		self.inner.read().is_initialized()
	}

	/// See [`ResourceRegistry::len`].
	pub fn len(&self) -> usize {
		self.inner.read().len()
	}

	/// See [`ResourceRegistry::is_empty`].
	pub fn is_empty(&self) -> bool {
		self.inner.read().is_empty()
	}

	/// Returns the slot count.
	pub fn capacity(&self) -> usize {
		R::CAPACITY
	}

	/// See [`ResourceRegistry::label`].
	pub fn label(&self) -> &'static str {
		self.inner.read().label()
	}

	/// Locks the registry for reading, e.g. to iterate.
	pub fn read(&self) -> RwLockReadGuard<'_, ResourceRegistry<T, R, Rd>> {
		self.inner.read()
	}

	/// Locks the registry for writing.
	pub fn write(&self) -> RwLockWriteGuard<'_, ResourceRegistry<T, R, Rd>> {
		self.inner.write()
	}
}

impl<T, R: SlotRef, Rd> core::fmt::Debug for SharedRegistry<T, R, Rd> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self.inner.try_read() {
			Some(reg) => f.debug_tuple("SharedRegistry").field(&*reg).finish(),
			None => f.write_str("SharedRegistry(<locked>)"),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Barrier;
	use std::thread;

	use super::*;
	use crate::{FnReader, MemoryReader, ReadError};

	crate::define_ref! {
		struct TileRef; capacity = 8;
	}

	fn shared() -> SharedRegistry<String, TileRef, MemoryReader<String>> {
		let reader = MemoryReader::new()
			.with("grass", "grass".to_string())
			.with("water", "water".to_string());
		let shared = SharedRegistry::new(ResourceRegistry::new("tiles", reader));
		shared.initialize();
		shared
	}

	#[test]
	fn clones_share_one_registry() {
		let a = shared();
		let b = a.clone();

		a.load(TileRef::from_raw(0), "grass").expect("loads");

		assert!(b.is_loaded(TileRef::from_raw(0)));
		assert_eq!(b.get(TileRef::from_raw(0)).as_deref().map(String::as_str), Some("grass"));
		assert_eq!(b.source_of(TileRef::from_raw(0)), Some(PathBuf::from("grass")));
	}

	#[test]
	fn get_is_absent_for_invalid_and_empty() {
		let shared = shared();
		assert!(shared.get(TileRef::INVALID).is_none());
		assert!(shared.get(TileRef::from_raw(5)).is_none());
		assert_eq!(shared.with(TileRef::from_raw(5), String::len), None);
	}

	#[test]
	fn with_and_get_cloned_read_the_record() {
		let shared = shared();
		shared.load(TileRef::from_raw(1), "water").expect("loads");

		assert_eq!(shared.with(TileRef::from_raw(1), String::len), Some(5));
		assert_eq!(shared.get_cloned(TileRef::from_raw(1)), Some("water".to_string()));
	}

	#[test]
	fn concurrent_load_free_hands_out_distinct_slots() {
		let reader = FnReader::new(|path: &Path| -> Result<String, ReadError> {
			Ok(path.display().to_string())
		});
		let shared = SharedRegistry::new(ResourceRegistry::<String, TileRef, _>::new("tiles", reader));
		shared.initialize();

		let barrier = Arc::new(Barrier::new(TileRef::CAPACITY));
		let handles: Vec<_> = (0..TileRef::CAPACITY)
			.map(|i| {
				let shared = shared.clone();
				let barrier = Arc::clone(&barrier);
				thread::spawn(move || {
					barrier.wait();
					shared.load_free(format!("tile-{i}")).expect("slot available")
				})
			})
			.collect();

		let mut refs: Vec<_> = handles
			.into_iter()
			.map(|h| h.join().expect("thread completes"))
			.collect();
		refs.sort();
		refs.dedup();

		assert_eq!(refs.len(), TileRef::CAPACITY);
		assert_eq!(shared.find_free_reference(), None);
		assert_eq!(shared.len(), TileRef::CAPACITY);
	}

	#[test]
	fn debug_reports_lock_state() {
		let shared = shared();
		assert!(format!("{shared:?}").contains("tiles"));

		let _guard = shared.write();
		assert_eq!(format!("{shared:?}"), "SharedRegistry(<locked>)");
	}
}
