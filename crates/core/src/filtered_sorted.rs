//! Data, filter and sort combinator.
//!
//! Whichever of the three sources fires recomputes the derived data from the latest value of the
//! other two and carries its own prescription downstream:
//!
//! | source | derived data                         | prescription                  |
//! |--------|--------------------------------------|-------------------------------|
//! | data   | `filter(sort(new data))`             | length + anchor relocation    |
//! | filter | `new filter(sorted snapshot)`        | length + anchor relocation    |
//! | sort   | `filter(sort(raw data, new order))`  | anchor re-pin                 |
//!
//! The sorted-but-unfiltered snapshot is cached so a filter change never re-sorts. Filtering a
//! stably sorted run gives the same result as sorting the filtered run.

use crate::{
	Comparator, DataAndPrescription, DataUnit, Filter, FilterUnit, Indexed, IndexedData, SortCriterion, SortUnit,
};

/// Merges the data, filter and sort units into one stream of derived data and prescriptions.
pub struct FilteredSortedData<T> {
	data: DataUnit<T>,
	filter: FilterUnit<T>,
	sort: SortUnit<T>,
	sorted: IndexedData<T>,
	latest: IndexedData<T>,
}

impl<T: 'static> Default for FilteredSortedData<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> FilteredSortedData<T> {
	pub fn new() -> Self {
		Self {
			data: DataUnit::new(),
			filter: FilterUnit::new(),
			sort: SortUnit::new(),
			sorted: Vec::new().into(),
			latest: Vec::new().into(),
		}
	}

	/// Startup emission: the empty data set under the default filter and ordering.
	///
	/// The default filter and ordering never fire on their own; this is the only startup output.
	pub fn initial(&mut self) -> DataAndPrescription<T> {
		let prescription = DataUnit::prescription(self.comparator().clone());
		self.emit(Vec::new(), prescription)
	}

	/// New raw data replaces the working set.
	pub fn on_data(&mut self, raw: Vec<T>) -> DataAndPrescription<T> {
		let indexed = self.data.replace(raw);
		self.sorted = self.sorted_copy(&indexed).into();
		let derived = self.filter.current().apply(&self.sorted);
		let prescription = DataUnit::prescription(self.comparator().clone());
		self.emit(derived, prescription)
	}

	/// A new filter applies to the sorted snapshot.
	pub fn on_filter(&mut self, filter: Filter<T>) -> DataAndPrescription<T> {
		let derived = self.filter.update(filter).apply(&self.sorted);
		let prescription = FilterUnit::prescription(self.comparator().clone());
		self.emit(derived, prescription)
	}

	/// A new sort criterion reorders the filtered records.
	pub fn on_sort(&mut self, criterion: SortCriterion<T>) -> DataAndPrescription<T> {
		let comparator = self.sort.update(criterion).clone();
		self.sorted = self.sorted_copy(self.data.latest()).into();
		let derived = self.filter.current().apply(&self.sorted);
		self.emit(derived, SortUnit::prescription(comparator))
	}

	/// Current composite ordering.
	pub fn comparator(&self) -> &Comparator<T> {
		self.sort.comparator()
	}

	/// Latest derived data.
	pub fn latest(&self) -> &IndexedData<T> {
		&self.latest
	}

	fn sorted_copy(&self, data: &[Indexed<T>]) -> Vec<Indexed<T>> {
		let mut sorted = data.to_vec();
		self.comparator().sort(&mut sorted);
		sorted
	}

	fn emit(&mut self, derived: Vec<Indexed<T>>, prescription: crate::Prescription<T>) -> DataAndPrescription<T> {
		self.latest = derived.into();
		tracing::trace!(len = self.latest.len(), "filtered_sorted.emit");
		DataAndPrescription {
			data: IndexedData::clone(&self.latest),
			prescription,
		}
	}
}
