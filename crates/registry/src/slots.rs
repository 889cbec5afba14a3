//! Fixed-capacity slot storage keyed by [`SlotRef`].

use core::marker::PhantomData;

use crate::SlotRef;

/// A table of `R::CAPACITY` optional values.
///
/// Storage is allocated once at construction. Every operation is O(1) except
/// [`SlotTable::first_free`] and iteration, which scan the table.
pub struct SlotTable<T, R: SlotRef> {
	slots: Box<[Option<T>]>,
	occupied: usize,
	_ref: PhantomData<fn() -> R>,
}

impl<T, R: SlotRef> SlotTable<T, R> {
	/// Creates an empty table sized to the reference type's capacity.
	pub fn new() -> Self {
		Self {
			slots: core::iter::repeat_with(|| None).take(R::CAPACITY).collect(),
			occupied: 0,
			_ref: PhantomData,
		}
	}

	/// Returns the number of slots.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.slots.len()
	}

	/// Returns the number of occupied slots.
	#[inline]
	pub fn len(&self) -> usize {
		self.occupied
	}

	/// Returns true if no slot is occupied.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.occupied == 0
	}

	/// Returns true if `r` is valid and its slot holds a value.
	#[inline]
	pub fn occupied(&self, r: R) -> bool {
		self.get(r).is_some()
	}

	/// Returns the value stored at `r`.
	#[inline]
	pub fn get(&self, r: R) -> Option<&T> {
		self.slots.get(r.index()?)?.as_ref()
	}

	/// Returns the value stored at `r` mutably.
	#[inline]
	pub fn get_mut(&mut self, r: R) -> Option<&mut T> {
		self.slots.get_mut(r.index()?)?.as_mut()
	}

	/// Stores `value` at `r`, dropping any previous value.
	///
	/// Hands the value back if `r` does not address a slot.
	pub fn set(&mut self, r: R, value: T) -> Result<&mut T, T> {
		let Some(slot) = r.index().and_then(|i| self.slots.get_mut(i)) else {
			return Err(value);
		};
		if slot.is_none() {
			self.occupied += 1;
		}
		Ok(slot.insert(value))
	}

	/// Removes and returns the value stored at `r`.
	pub fn clear(&mut self, r: R) -> Option<T> {
		let taken = self.slots.get_mut(r.index()?)?.take();
		if taken.is_some() {
			self.occupied -= 1;
		}
		taken
	}

	/// Drops every stored value.
	pub fn clear_all(&mut self) {
		for slot in self.slots.iter_mut() {
			*slot = None;
		}
		self.occupied = 0;
	}

	/// Returns the lowest unoccupied reference, or `None` when full.
	pub fn first_free(&self) -> Option<R> {
		if self.occupied == self.slots.len() {
			return None;
		}
		self.slots
			.iter()
			.position(Option::is_none)
			.map(|i| R::from_raw(i as u32))
	}

	/// Iterates occupied slots in ascending reference order.
	pub fn iter(&self) -> impl Iterator<Item = (R, &T)> + '_ {
		self.slots
			.iter()
			.enumerate()
			.filter_map(|(i, slot)| slot.as_ref().map(|v| (R::from_raw(i as u32), v)))
	}
}

impl<T, R: SlotRef> Default for SlotTable<T, R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: core::fmt::Debug, R: SlotRef> core::fmt::Debug for SlotTable<T, R> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

#[cfg(test)]
mod tests;
