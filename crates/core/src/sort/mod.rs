//! Multi-column ordering.
//!
//! Sorting follows the usual column-header UX: the most recently changed column takes primary
//! precedence, earlier columns break its ties, and clearing a column removes it. Records that every
//! active criterion considers equal fall back to their original emission order.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::prescription::PaginatorStateUpdate;
use crate::{Indexed, Prescription, find_anchor_index};

#[cfg(test)]
mod tests;

/// Key of the synthetic criterion ordering records by emission position.
pub const INDEX_KEY: &str = "_index";

/// Comparison function for indexed records.
pub type CompareFn<T> = Arc<dyn Fn(&Indexed<T>, &Indexed<T>) -> Ordering + Send + Sync>;

/// Direction of an active sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
	/// Smallest first.
	#[serde(rename = "asc")]
	Ascending,
	/// Largest first.
	#[serde(rename = "desc")]
	Descending,
}

impl SortDirection {
	/// Orients a comparison result.
	pub fn apply(self, ordering: Ordering) -> Ordering {
		match self {
			Self::Ascending => ordering,
			Self::Descending => ordering.reverse(),
		}
	}
}

/// One sort request for a field key.
///
/// A criterion without a direction clears that key from the active ordering.
pub struct SortCriterion<T> {
	key: String,
	direction: Option<SortDirection>,
	compare: CompareFn<T>,
}

impl<T: 'static> SortCriterion<T> {
	/// Creates a criterion from a raw comparison function.
	pub fn new<F>(key: impl Into<String>, direction: Option<SortDirection>, compare: F) -> Self
	where
		F: Fn(&Indexed<T>, &Indexed<T>) -> Ordering + Send + Sync + 'static,
	{
		Self {
			key: key.into(),
			direction,
			compare: Arc::new(compare),
		}
	}

	/// Ascending criterion.
	pub fn ascending<F>(key: impl Into<String>, compare: F) -> Self
	where
		F: Fn(&Indexed<T>, &Indexed<T>) -> Ordering + Send + Sync + 'static,
	{
		Self::new(key, Some(SortDirection::Ascending), compare)
	}

	/// Descending criterion.
	pub fn descending<F>(key: impl Into<String>, compare: F) -> Self
	where
		F: Fn(&Indexed<T>, &Indexed<T>) -> Ordering + Send + Sync + 'static,
	{
		Self::new(key, Some(SortDirection::Descending), compare)
	}

	/// Removes `key` from the active ordering.
	pub fn cleared(key: impl Into<String>) -> Self {
		Self::new(key, None, |_, _| Ordering::Equal)
	}

	/// Criterion comparing a key extracted from each record.
	pub fn by_key<K, F>(key: impl Into<String>, direction: Option<SortDirection>, extract: F) -> Self
	where
		K: Ord,
		F: Fn(&T) -> K + Send + Sync + 'static,
	{
		Self::new(key, direction, move |a, b| extract(a.record()).cmp(&extract(b.record())))
	}

	/// Field key the criterion applies to.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Direction, or `None` for a clearing request.
	pub fn direction(&self) -> Option<SortDirection> {
		self.direction
	}

	/// Ascending criterion over emission positions.
	fn emission_order() -> Self {
		Self::ascending(INDEX_KEY, |a, b| a.index().cmp(&b.index()))
	}
}

impl<T> Clone for SortCriterion<T> {
	fn clone(&self) -> Self {
		Self {
			key: self.key.clone(),
			direction: self.direction,
			compare: Arc::clone(&self.compare),
		}
	}
}

impl<T> fmt::Debug for SortCriterion<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SortCriterion").field("key", &self.key).field("direction", &self.direction).finish_non_exhaustive()
	}
}

/// An active criterion. Always carries a direction.
struct ActiveSort<T> {
	key: String,
	direction: SortDirection,
	compare: CompareFn<T>,
}

impl<T> Clone for ActiveSort<T> {
	fn clone(&self) -> Self {
		Self {
			key: self.key.clone(),
			direction: self.direction,
			compare: Arc::clone(&self.compare),
		}
	}
}

/// Composite comparator over the active criteria, most recent first.
///
/// Always total: records that tie on every criterion are ordered by ascending emission index.
pub struct Comparator<T> {
	order: Arc<[ActiveSort<T>]>,
}

impl<T> Clone for Comparator<T> {
	fn clone(&self) -> Self {
		Self {
			order: Arc::clone(&self.order),
		}
	}
}

impl<T: 'static> Default for Comparator<T> {
	fn default() -> Self {
		let initial = SortCriterion::emission_order();
		Self::from_active(vec![ActiveSort {
			key: initial.key,
			direction: SortDirection::Ascending,
			compare: initial.compare,
		}])
	}
}

impl<T> fmt::Debug for Comparator<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.order.iter().map(|sort| (&sort.key, sort.direction))).finish()
	}
}

impl<T> Comparator<T> {
	fn from_active(order: Vec<ActiveSort<T>>) -> Self {
		Self { order: order.into() }
	}

	/// Compares two records.
	pub fn compare(&self, a: &Indexed<T>, b: &Indexed<T>) -> Ordering {
		self.order
			.iter()
			.map(|sort| sort.direction.apply((sort.compare)(a, b)))
			.find(|ordering| ordering.is_ne())
			.unwrap_or_else(|| a.index().cmp(&b.index()))
	}

	/// Sorts `data` in place. The sort is stable.
	pub fn sort(&self, data: &mut [Indexed<T>]) {
		data.sort_by(|a, b| self.compare(a, b));
	}

	/// Active keys with their directions, most recent first.
	pub fn keys(&self) -> impl Iterator<Item = (&str, SortDirection)> {
		self.order.iter().map(|sort| (sort.key.as_str(), sort.direction))
	}
}

/// Holds the active ordering and folds sort requests into it.
pub struct SortUnit<T> {
	comparator: Comparator<T>,
}

impl<T: 'static> Default for SortUnit<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> SortUnit<T> {
	/// Starts with the emission-order criterion.
	pub fn new() -> Self {
		Self {
			comparator: Comparator::default(),
		}
	}

	/// Current composite comparator.
	pub fn comparator(&self) -> &Comparator<T> {
		&self.comparator
	}

	/// Applies one sort request and returns the new comparator.
	///
	/// Any criterion with the same key is replaced; a directed request moves to the front.
	pub fn update(&mut self, criterion: SortCriterion<T>) -> &Comparator<T> {
		let mut order: Vec<_> = self.comparator.order.iter().filter(|sort| sort.key != criterion.key).cloned().collect();
		if let Some(direction) = criterion.direction {
			order.insert(
				0,
				ActiveSort {
					key: criterion.key,
					direction,
					compare: criterion.compare,
				},
			);
		}
		self.comparator = Comparator::from_active(order);
		tracing::trace!(active = self.comparator.order.len(), "sort.updated");
		&self.comparator
	}
}

impl<T: 'static> SortUnit<T> {
	/// Prescription for a re-sort.
	///
	/// A remembered anchor element is located in the re-sorted data and both the anchor index and
	/// element are re-pinned, so the page keeps showing it. Without one, the record currently at
	/// the anchor index becomes the anchor.
	pub fn prescription(comparator: Comparator<T>) -> Prescription<T> {
		Prescription::new(move |data, state| match &state.anchor_element {
			Some(anchor) => {
				let anchor_index = find_anchor_index(data, |a, b| comparator.compare(a, b), Some(anchor));
				PaginatorStateUpdate::default()
					.with_anchor_index(anchor_index)
					.with_anchor_element(data.get(anchor_index).cloned())
			}
			None => PaginatorStateUpdate::default().with_anchor_element(data.get(state.anchor_index).cloned()),
		})
	}
}
