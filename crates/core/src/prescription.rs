//! Deferred paginator updates.

use std::fmt;
use std::sync::Arc;

use crate::{Comparator, Indexed, IndexedData, PaginatorState, find_anchor_index};

/// Partial paginator state produced by a [`Prescription`].
///
/// `None` leaves a field untouched. The page index is never set directly; the reducer always
/// re-derives it from the anchor index and page size.
pub struct PaginatorStateUpdate<T> {
	/// New page size.
	pub page_size: Option<usize>,
	/// New length of the derived data.
	pub length: Option<usize>,
	/// New anchor position.
	pub anchor_index: Option<usize>,
	/// New anchor element. `Some(None)` forgets the anchor.
	pub anchor_element: Option<Option<Indexed<T>>>,
}

impl<T> Default for PaginatorStateUpdate<T> {
	fn default() -> Self {
		Self {
			page_size: None,
			length: None,
			anchor_index: None,
			anchor_element: None,
		}
	}
}

impl<T> Clone for PaginatorStateUpdate<T> {
	fn clone(&self) -> Self {
		Self {
			page_size: self.page_size,
			length: self.length,
			anchor_index: self.anchor_index,
			anchor_element: self.anchor_element.clone(),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for PaginatorStateUpdate<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PaginatorStateUpdate")
			.field("page_size", &self.page_size)
			.field("length", &self.length)
			.field("anchor_index", &self.anchor_index)
			.field("anchor_element", &self.anchor_element)
			.finish()
	}
}

impl<T> PaginatorStateUpdate<T> {
	#[must_use]
	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = Some(page_size);
		self
	}

	#[must_use]
	pub fn with_length(mut self, length: usize) -> Self {
		self.length = Some(length);
		self
	}

	#[must_use]
	pub fn with_anchor_index(mut self, anchor_index: usize) -> Self {
		self.anchor_index = Some(anchor_index);
		self
	}

	#[must_use]
	pub fn with_anchor_element(mut self, anchor_element: Option<Indexed<T>>) -> Self {
		self.anchor_element = Some(anchor_element);
		self
	}

	/// Returns true when the update changes nothing.
	pub fn is_empty(&self) -> bool {
		self.page_size.is_none() && self.length.is_none() && self.anchor_index.is_none() && self.anchor_element.is_none()
	}
}

type PrescriptionFn<T> = dyn Fn(&[Indexed<T>], &PaginatorState<T>) -> PaginatorStateUpdate<T> + Send + Sync;

/// Pure function from `(data, current state)` to a partial state update.
///
/// Evaluation is deferred until the reducer folds it, so it always sees the freshest data and
/// paginator state.
pub struct Prescription<T> {
	apply: Arc<PrescriptionFn<T>>,
}

impl<T> Clone for Prescription<T> {
	fn clone(&self) -> Self {
		Self {
			apply: Arc::clone(&self.apply),
		}
	}
}

impl<T> fmt::Debug for Prescription<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Prescription(..)")
	}
}

impl<T: 'static> Prescription<T> {
	pub fn new<F>(apply: F) -> Self
	where
		F: Fn(&[Indexed<T>], &PaginatorState<T>) -> PaginatorStateUpdate<T> + Send + Sync + 'static,
	{
		Self { apply: Arc::new(apply) }
	}

	/// Prescription that changes nothing.
	pub fn noop() -> Self {
		Self::new(|_, _| PaginatorStateUpdate::default())
	}

	/// Recomputes the length and relocates the remembered anchor element under `comparator`.
	///
	/// Used whenever records were added, removed or replaced, which shifts positions.
	pub fn relocate_anchor(comparator: Comparator<T>) -> Self {
		Self::new(move |data, state| {
			let anchor_index = find_anchor_index(data, |a, b| comparator.compare(a, b), state.anchor_element.as_ref());
			PaginatorStateUpdate::default().with_length(data.len()).with_anchor_index(anchor_index)
		})
	}
}

impl<T> Prescription<T> {
	/// Evaluates the prescription.
	pub fn apply(&self, data: &[Indexed<T>], state: &PaginatorState<T>) -> PaginatorStateUpdate<T> {
		(self.apply)(data, state)
	}
}

/// Derived data paired with the prescription of the source that produced it.
pub struct DataAndPrescription<T> {
	/// Filtered and sorted data.
	pub data: IndexedData<T>,
	/// Update to fold into the paginator state.
	pub prescription: Prescription<T>,
}

impl<T> Clone for DataAndPrescription<T> {
	fn clone(&self) -> Self {
		Self {
			data: IndexedData::clone(&self.data),
			prescription: self.prescription.clone(),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for DataAndPrescription<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DataAndPrescription").field("data", &self.data).finish_non_exhaustive()
	}
}
