use serde::{Deserialize, Serialize};

use crate::{PaginatorStateUpdate, Prescription};

/// Page index request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageIndex {
	pub page_index: usize,
}

impl PageIndex {
	pub const fn new(page_index: usize) -> Self {
		Self { page_index }
	}
}

/// Holds the latest page index request.
#[derive(Debug, Default)]
pub struct PageIndexUnit {
	latest: Option<PageIndex>,
}

impl PageIndexUnit {
	/// Records `event` and returns a prescription moving the anchor to the first record of the
	/// requested page.
	///
	/// Pages past the end of the data produce an empty update.
	pub fn update<T: 'static>(&mut self, event: PageIndex) -> Prescription<T> {
		self.latest = Some(event);
		let PageIndex { page_index } = event;
		Prescription::new(move |data, state| {
			let Some(anchor_index) = page_index.checked_mul(state.page_size) else {
				return PaginatorStateUpdate::default();
			};
			if anchor_index != 0 && anchor_index >= state.length {
				tracing::trace!(page_index, anchor_index, length = state.length, "page_index.out_of_range");
				return PaginatorStateUpdate::default();
			}
			PaginatorStateUpdate::default()
				.with_anchor_index(anchor_index)
				.with_anchor_element(data.get(anchor_index).cloned())
		})
	}

	pub fn latest(&self) -> Option<PageIndex> {
		self.latest
	}
}
