use std::fmt;
use std::sync::Arc;

use crate::{Comparator, Indexed, Prescription};

/// Record predicate. The default accepts everything.
pub struct Filter<T> {
	predicate: Arc<dyn Fn(&Indexed<T>) -> bool + Send + Sync>,
}

impl<T: 'static> Filter<T> {
	pub fn new(predicate: impl Fn(&Indexed<T>) -> bool + Send + Sync + 'static) -> Self {
		Self {
			predicate: Arc::new(predicate),
		}
	}

	/// Filter keeping every record.
	pub fn accept_all() -> Self {
		Self::new(|_| true)
	}

	pub fn matches(&self, record: &Indexed<T>) -> bool {
		(self.predicate)(record)
	}

	/// Keeps the matching records of `data`, preserving their order.
	pub fn apply(&self, data: &[Indexed<T>]) -> Vec<Indexed<T>> {
		data.iter().filter(|record| self.matches(record)).cloned().collect()
	}
}

impl<T: 'static> Default for Filter<T> {
	fn default() -> Self {
		Self::accept_all()
	}
}

impl<T> Clone for Filter<T> {
	fn clone(&self) -> Self {
		Self {
			predicate: Arc::clone(&self.predicate),
		}
	}
}

impl<T> fmt::Debug for Filter<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Filter(..)")
	}
}

/// Holds the latest filter.
#[derive(Debug)]
pub struct FilterUnit<T> {
	current: Filter<T>,
}

impl<T: 'static> Default for FilterUnit<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> FilterUnit<T> {
	pub fn new() -> Self {
		Self { current: Filter::default() }
	}

	pub fn update(&mut self, filter: Filter<T>) -> &Filter<T> {
		self.current = filter;
		&self.current
	}

	pub fn current(&self) -> &Filter<T> {
		&self.current
	}
}

impl<T: 'static> FilterUnit<T> {
	/// Filtering adds or removes records and shifts positions, so the length is recomputed and the
	/// anchor relocated.
	pub fn prescription(comparator: Comparator<T>) -> Prescription<T> {
		Prescription::relocate_anchor(comparator)
	}
}
