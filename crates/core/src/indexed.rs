use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Shared, immutable run of indexed records.
pub type IndexedData<T> = Arc<[Indexed<T>]>;

/// A record tagged with its position in the raw emission it arrived in.
///
/// The record itself is reference counted, so filtering, sorting and slicing only ever copy
/// handles. Indices restart at zero on every emission; they are not stable across data
/// replacements.
pub struct Indexed<T> {
	index: usize,
	record: Arc<T>,
}

impl<T> Indexed<T> {
	/// Tags `record` with `index`.
	pub fn new(index: usize, record: T) -> Self {
		Self {
			index,
			record: Arc::new(record),
		}
	}

	/// Position of the record in the emission that produced it.
	pub const fn index(&self) -> usize {
		self.index
	}

	/// The wrapped record.
	pub fn record(&self) -> &T {
		&self.record
	}

	/// Returns true when both handles point at the same record allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.record, &other.record)
	}
}

impl<T> Clone for Indexed<T> {
	fn clone(&self) -> Self {
		Self {
			index: self.index,
			record: Arc::clone(&self.record),
		}
	}
}

impl<T> Deref for Indexed<T> {
	type Target = T;

	fn deref(&self) -> &T {
		&self.record
	}
}

impl<T: PartialEq> PartialEq for Indexed<T> {
	fn eq(&self, other: &Self) -> bool {
		self.index == other.index && self.record == other.record
	}
}

impl<T: Eq> Eq for Indexed<T> {}

impl<T: fmt::Debug> fmt::Debug for Indexed<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Indexed").field("index", &self.index).field("record", &*self.record).finish()
	}
}
