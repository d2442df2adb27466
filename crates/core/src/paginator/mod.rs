//! Paginator state machine.
//!
//! [`DataPaginator`] is a left fold over [`DataAndPrescription`] values. Each step evaluates the
//! prescription against the incoming data and the current state, merges the result, and keeps the
//! previous state if the merge would break an invariant.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::{DataAndPrescription, Indexed, IndexedData, PaginatorStateUpdate};


/// Paginator metadata for the current view.
///
/// Invariants for every state the reducer produces:
/// - `anchor_index == 0 || anchor_index < length`
/// - `page_index == anchor_index / page_size` when `page_size > 0`, else `0`
#[derive(PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatorState<T> {
	pub page_index: usize,
	pub page_size: usize,
	pub length: usize,
	pub anchor_index: usize,
	#[serde(skip)]
	pub anchor_element: Option<Indexed<T>>,
}

impl<T> Clone for PaginatorState<T> {
	fn clone(&self) -> Self {
		Self {
			page_index: self.page_index,
			page_size: self.page_size,
			length: self.length,
			anchor_index: self.anchor_index,
			anchor_element: self.anchor_element.clone(),
		}
	}
}

impl<T> Default for PaginatorState<T> {
	fn default() -> Self {
		Self::zero()
	}
}

impl<T: fmt::Debug> fmt::Debug for PaginatorState<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PaginatorState")
			.field("page_index", &self.page_index)
			.field("page_size", &self.page_size)
			.field("length", &self.length)
			.field("anchor_index", &self.anchor_index)
			.field("anchor_element", &self.anchor_element)
			.finish()
	}
}

impl<T> PaginatorState<T> {
	/// All-zero state without an anchor.
	pub const fn zero() -> Self {
		Self {
			page_index: 0,
			page_size: 0,
			length: 0,
			anchor_index: 0,
			anchor_element: None,
		}
	}

	/// Returns true when the anchor fits the data.
	pub fn is_valid(&self) -> bool {
		self.anchor_index == 0 || self.anchor_index < self.length
	}

	/// Range of `len` elements covered by the current page, clamped to `len`.
	pub fn page_range(&self, len: usize) -> Range<usize> {
		let start = self.page_index.saturating_mul(self.page_size).min(len);
		let end = start.saturating_add(self.page_size).min(len);
		start..end
	}

	/// Shallow field overwrite. The page index is left for [`Self::rederived`].
	fn merged(&self, update: PaginatorStateUpdate<T>) -> Self {
		Self {
			page_index: self.page_index,
			page_size: update.page_size.unwrap_or(self.page_size),
			length: update.length.unwrap_or(self.length),
			anchor_index: update.anchor_index.unwrap_or(self.anchor_index),
			anchor_element: match update.anchor_element {
				Some(element) => element,
				None => self.anchor_element.clone(),
			},
		}
	}

	/// Fills an unset page size from the length and recomputes the page index.
	fn rederived(mut self) -> Self {
		if self.page_size == 0 {
			self.page_size = self.length;
		}
		self.page_index = self.anchor_index.checked_div(self.page_size).unwrap_or(0);
		self
	}
}

/// Derived data and the paginator state computed for it.
pub struct DataAndPaginatorState<T> {
	pub data: IndexedData<T>,
	pub paginator_state: PaginatorState<T>,
}

impl<T> Clone for DataAndPaginatorState<T> {
	fn clone(&self) -> Self {
		Self {
			data: IndexedData::clone(&self.data),
			paginator_state: self.paginator_state.clone(),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for DataAndPaginatorState<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DataAndPaginatorState")
			.field("data", &self.data)
			.field("paginator_state", &self.paginator_state)
			.finish()
	}
}

/// Reducer owning the paginator state.
pub struct DataPaginator<T> {
	current: DataAndPaginatorState<T>,
}

impl<T> fmt::Debug for DataPaginator<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = &self.current.paginator_state;
		f.debug_struct("DataPaginator")
			.field("page_index", &state.page_index)
			.field("page_size", &state.page_size)
			.field("length", &state.length)
			.field("anchor_index", &state.anchor_index)
			.finish_non_exhaustive()
	}
}

impl<T> DataPaginator<T> {
	/// Seeds the reducer with the zero state, optionally merged with an initial page size.
	pub fn new(initial_page_size: Option<usize>) -> Self {
		let zero = PaginatorState::zero();
		let paginator_state = match initial_page_size {
			Some(page_size) => {
				let update = PaginatorStateUpdate::default().with_page_size(page_size);
				merge_checked(&zero, update).unwrap_or(zero)
			}
			None => zero,
		};
		Self {
			current: DataAndPaginatorState {
				data: Vec::new().into(),
				paginator_state,
			},
		}
	}

	/// Folds one prescription into the state.
	///
	/// The incoming data always replaces the current data. The state only changes if the merged
	/// result is valid.
	pub fn reduce(&mut self, next: DataAndPrescription<T>) -> &DataAndPaginatorState<T> {
		let DataAndPrescription { data, prescription } = next;
		let update = prescription.apply(&data, &self.current.paginator_state);
		if let Some(state) = merge_checked(&self.current.paginator_state, update) {
			self.current.paginator_state = state;
		}
		self.current.data = data;
		&self.current
	}

	/// Latest derived data and paginator state.
	pub fn current(&self) -> &DataAndPaginatorState<T> {
		&self.current
	}

	/// Latest paginator state.
	pub fn state(&self) -> &PaginatorState<T> {
		&self.current.paginator_state
	}

	/// Records on the current page.
	pub fn page(&self) -> IndexedData<T> {
		slice_page(&self.current.data, &self.current.paginator_state)
	}
}

fn merge_checked<T>(state: &PaginatorState<T>, update: PaginatorStateUpdate<T>) -> Option<PaginatorState<T>> {
	let merged = state.merged(update);
	if !merged.is_valid() {
		tracing::debug!(
			length = merged.length,
			anchor_index = merged.anchor_index,
			page_size = merged.page_size,
			"paginator.update_rejected"
		);
		return None;
	}
	Some(merged.rederived())
}

/// Slices the page described by `state` out of `data`.
///
/// Bounds past the end of `data` are clamped; the result may be shorter than a full page or empty.
pub fn slice_page<T>(data: &[Indexed<T>], state: &PaginatorState<T>) -> IndexedData<T> {
	data[state.page_range(data.len())].iter().cloned().collect()
}
