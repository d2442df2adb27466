use serde::{Deserialize, Serialize};

use crate::{PaginatorStateUpdate, Prescription};

/// Page size request. Zero shows every record on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSize {
	pub page_size: usize,
}

impl PageSize {
	pub const fn new(page_size: usize) -> Self {
		Self { page_size }
	}
}

/// Holds the latest page size request.
#[derive(Debug, Default)]
pub struct PageSizeUnit {
	latest: Option<PageSize>,
}

impl PageSizeUnit {
	/// Records `event` and returns a prescription setting the page size verbatim.
	///
	/// The anchor index is untouched, so the page index follows the anchor under the new size.
	pub fn update<T: 'static>(&mut self, event: PageSize) -> Prescription<T> {
		self.latest = Some(event);
		let PageSize { page_size } = event;
		Prescription::new(move |_, _| PaginatorStateUpdate::default().with_page_size(page_size))
	}

	pub fn latest(&self) -> Option<PageSize> {
		self.latest
	}
}
