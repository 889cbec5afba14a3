//! Lazily constructed process-wide registries.
//!
//! Prefer passing a [`SharedRegistry`] to the components that need it. A
//! [`RegistryInstance`] exists for call sites that want one globally reachable
//! registry per record type; it hands out the same shared handle for the
//! lifetime of the process.

use std::sync::OnceLock;

use crate::{Reader, ResourceRegistry, SharedRegistry, SlotRef};

/// A registry built on first access and reachable from a `static`.
///
/// ```
/// use tessel_registry::{MemoryReader, RegistryInstance, SlotRef};
///
/// tessel_registry::define_ref! {
/// 	pub struct GlyphRef; capacity = 8;
/// }
///
/// static GLYPHS: RegistryInstance<char, GlyphRef, MemoryReader<char>> =
/// 	RegistryInstance::new("glyphs", || MemoryReader::new().with("a", 'a'));
///
/// GLYPHS.initialize();
/// GLYPHS.get().load(GlyphRef::from_raw(0), "a").unwrap();
/// assert!(GLYPHS.get().is_loaded(GlyphRef::from_raw(0)));
/// GLYPHS.uninitialize();
/// ```
pub struct RegistryInstance<T, R: SlotRef, Rd> {
	label: &'static str,
	make_reader: fn() -> Rd,
	cell: OnceLock<SharedRegistry<T, R, Rd>>,
}

impl<T, R: SlotRef, Rd> RegistryInstance<T, R, Rd> {
	/// Declares an instance. Nothing is allocated until first access.
	pub const fn new(label: &'static str, make_reader: fn() -> Rd) -> Self {
		Self {
			label,
			make_reader,
			cell: OnceLock::new(),
		}
	}

	/// Returns true once the registry has been constructed.
	pub fn is_constructed(&self) -> bool {
		self.cell.get().is_some()
	}
}

impl<T, R: SlotRef, Rd: Reader<T>> RegistryInstance<T, R, Rd> {
	/// Returns the process-wide registry, constructing it on first call.
	pub fn get(&self) -> &SharedRegistry<T, R, Rd> {
		self.cell.get_or_init(|| {
			tracing::trace!(registry = self.label, "registry.instance.construct");
			SharedRegistry::new(ResourceRegistry::new(self.label, (self.make_reader)()))
		})
	}

	/// Returns a handle for dependency injection.
	pub fn handle(&self) -> SharedRegistry<T, R, Rd> {
		self.get().clone()
	}

	/// Initializes the wrapped registry. Idempotent.
	pub fn initialize(&self) {
		self.get().initialize();
	}

	/// Uninitializes the wrapped registry, if it was ever constructed.
	pub fn uninitialize(&self) {
		if let Some(shared) = self.cell.get() {
			shared.uninitialize();
		}
	}
}

impl<T, R: SlotRef, Rd> core::fmt::Debug for RegistryInstance<T, R, Rd> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("RegistryInstance")
			.field("label", &self.label)
			.field("constructed", &self.is_constructed())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MemoryReader;

	crate::define_ref! {
		struct SoundRef; capacity = 2;
	}

	fn sounds() -> MemoryReader<u32> {
		MemoryReader::new().with("beep", 440).with("boop", 220)
	}

	static SOUNDS: RegistryInstance<u32, SoundRef, MemoryReader<u32>> = RegistryInstance::new("sounds", sounds);

	static UNTOUCHED: RegistryInstance<u32, SoundRef, MemoryReader<u32>> = RegistryInstance::new("untouched", sounds);

	#[test]
	fn get_returns_same_instance() {
		SOUNDS.initialize();
		SOUNDS.initialize();

		SOUNDS.get().load(SoundRef::from_raw(1), "boop").expect("loads");
		let handle = SOUNDS.handle();
		assert_eq!(handle.get_cloned(SoundRef::from_raw(1)), Some(220));
		assert!(std::ptr::eq(SOUNDS.get(), SOUNDS.get()));

		SOUNDS.uninitialize();
		assert!(!handle.is_loaded(SoundRef::from_raw(1)));
		assert!(!handle.is_initialized());
		SOUNDS.uninitialize();
	}

	#[test]
	fn uninitialize_does_not_construct() {
		UNTOUCHED.uninitialize();
		assert!(!UNTOUCHED.is_constructed());
	}
}
