//! Bounded slot references.
//!
//! A reference is a `u32` newtype whose valid range is `[0, CAPACITY)`. The
//! value `u32::MAX` is reserved as the `INVALID` sentinel. Reference types are
//! declared with [`define_ref!`](crate::define_ref), which fixes the capacity
//! of every registry keyed by that type.

use core::fmt::{Debug, Display};
use core::hash::Hash;

/// Raw value reserved for invalid references.
pub const INVALID_RAW: u32 = u32::MAX;

/// A bounded handle into a fixed-capacity slot table.
pub trait SlotRef: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
	/// Number of slots addressable by this reference type.
	const CAPACITY: usize;

	/// The distinguished invalid reference.
	const INVALID: Self;

	/// Builds a reference from a raw value, normalizing anything outside
	/// `[0, CAPACITY)` to [`SlotRef::INVALID`].
	fn from_raw(raw: u32) -> Self;

	/// Returns the underlying raw value.
	fn raw(self) -> u32;

	/// Builds a reference from a slot index, or `None` if it is out of range.
	#[inline]
	fn new(index: usize) -> Option<Self> {
		if index < Self::CAPACITY {
			Some(Self::from_raw(index as u32))
		} else {
			None
		}
	}

	/// Returns the slot index, or `None` for invalid references.
	#[inline]
	fn index(self) -> Option<usize> {
		let raw = self.raw();
		if raw != INVALID_RAW && (raw as usize) < Self::CAPACITY {
			Some(raw as usize)
		} else {
			None
		}
	}

	/// Returns true if this reference addresses a slot.
	#[inline]
	fn is_valid(self) -> bool {
		self.index().is_some()
	}

	/// Iterates every valid reference in ascending order.
	fn all() -> impl Iterator<Item = Self> {
		(0..Self::CAPACITY).map(|i| Self::from_raw(i as u32))
	}
}

/// Declares a [`SlotRef`] newtype with a fixed capacity.
///
/// ```
/// tessel_registry::define_ref! {
/// 	/// Handle to a loaded texture.
/// 	pub struct TextureRef; capacity = 16;
/// }
///
/// use tessel_registry::SlotRef;
///
/// assert_eq!(TextureRef::from_raw(3).index(), Some(3));
/// assert_eq!(TextureRef::from_raw(16), TextureRef::INVALID);
/// ```
#[macro_export]
macro_rules! define_ref {
	(
		$(#[$attr:meta])*
		$vis:vis struct $name:ident; capacity = $cap:expr;
	) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
		$vis struct $name(u32);

		const _: () = assert!(
			($cap as usize) < $crate::reference::INVALID_RAW as usize,
			"slot capacity must leave room for the invalid sentinel"
		);

		impl $name {
			/// Represents an invalid reference.
			pub const INVALID: $name = $name($crate::reference::INVALID_RAW);

			/// Number of slots addressable by this reference type.
			pub const CAPACITY: usize = $cap;

			/// Returns the underlying u32 value.
			#[inline]
			pub fn as_u32(self) -> u32 {
				self.0
			}
		}

		impl $crate::SlotRef for $name {
			const CAPACITY: usize = $cap;
			const INVALID: Self = $name($crate::reference::INVALID_RAW);

			#[inline]
			fn from_raw(raw: u32) -> Self {
				if (raw as usize) < $cap {
					$name(raw)
				} else {
					$name($crate::reference::INVALID_RAW)
				}
			}

			#[inline]
			fn raw(self) -> u32 {
				self.0
			}
		}

		impl ::core::fmt::Display for $name {
			fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
				if self.0 == $crate::reference::INVALID_RAW {
					write!(f, "{}(INVALID)", stringify!($name))
				} else {
					write!(f, "{}({})", stringify!($name), self.0)
				}
			}
		}

		impl ::core::default::Default for $name {
			fn default() -> Self {
				Self::INVALID
			}
		}
	};
}
