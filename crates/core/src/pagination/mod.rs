//! Page size and page index inputs.

mod page_index;
mod page_size;

pub use page_index::{PageIndex, PageIndexUnit};
pub use page_size::{PageSize, PageSizeUnit};

use crate::Prescription;

/// Merges page-size and page-index requests into one prescription stream, in arrival order.
#[derive(Debug, Default)]
pub struct PaginationEvents {
	page_size: PageSizeUnit,
	page_index: PageIndexUnit,
}

impl PaginationEvents {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn on_page_size<T: 'static>(&mut self, event: PageSize) -> Prescription<T> {
		self.page_size.update(event)
	}

	pub fn on_page_index<T: 'static>(&mut self, event: PageIndex) -> Prescription<T> {
		self.page_index.update(event)
	}

	/// Latest page-size request, if any.
	pub fn page_size(&self) -> Option<PageSize> {
		self.page_size.latest()
	}

	/// Latest page-index request, if any.
	pub fn page_index(&self) -> Option<PageIndex> {
		self.page_index.latest()
	}
}
