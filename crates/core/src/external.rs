use crate::{
	DataAndPrescription, FilteredSortedData, IndexedData, PageIndex, PageSize, PaginationEvents, Prescription, SourceEvent,
};

/// Canonical update stream: data, filter and sort outputs pass through unchanged, while page
/// requests are paired with the most recent derived data.
pub struct ExternalUpdates<T> {
	filtered_sorted: FilteredSortedData<T>,
	pagination: PaginationEvents,
	latest_data: Option<IndexedData<T>>,
}

impl<T: 'static> Default for ExternalUpdates<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: 'static> ExternalUpdates<T> {
	pub fn new() -> Self {
		Self {
			filtered_sorted: FilteredSortedData::new(),
			pagination: PaginationEvents::new(),
			latest_data: None,
		}
	}

	/// Startup emission of the data, filter and sort combinator.
	pub fn initial(&mut self) -> DataAndPrescription<T> {
		let out = self.filtered_sorted.initial();
		self.remember(out)
	}

	/// Routes one event to its unit.
	///
	/// Page requests that arrive before any derived data exists are dropped.
	pub fn apply(&mut self, event: SourceEvent<T>) -> Option<DataAndPrescription<T>> {
		match event {
			SourceEvent::Data(raw) => {
				let out = self.filtered_sorted.on_data(raw);
				Some(self.remember(out))
			}
			SourceEvent::Filter(filter) => {
				let out = self.filtered_sorted.on_filter(filter);
				Some(self.remember(out))
			}
			SourceEvent::Sort(criterion) => {
				let out = self.filtered_sorted.on_sort(criterion);
				Some(self.remember(out))
			}
			SourceEvent::PageSize(event) => self.on_page_size(event),
			SourceEvent::PageIndex(event) => self.on_page_index(event),
		}
	}

	pub fn on_page_size(&mut self, event: PageSize) -> Option<DataAndPrescription<T>> {
		let prescription = self.pagination.on_page_size(event);
		self.with_latest_data(prescription)
	}

	pub fn on_page_index(&mut self, event: PageIndex) -> Option<DataAndPrescription<T>> {
		let prescription = self.pagination.on_page_index(event);
		self.with_latest_data(prescription)
	}

	/// The data, filter and sort combinator.
	pub fn filtered_sorted(&self) -> &FilteredSortedData<T> {
		&self.filtered_sorted
	}

	/// The page size and page index combinator.
	pub fn pagination(&self) -> &PaginationEvents {
		&self.pagination
	}

	fn remember(&mut self, out: DataAndPrescription<T>) -> DataAndPrescription<T> {
		self.latest_data = Some(IndexedData::clone(&out.data));
		out
	}

	fn with_latest_data(&self, prescription: Prescription<T>) -> Option<DataAndPrescription<T>> {
		let Some(data) = &self.latest_data else {
			tracing::trace!("external_updates.page_event_before_data");
			return None;
		};
		Some(DataAndPrescription {
			data: IndexedData::clone(data),
			prescription,
		})
	}
}
