use std::fmt;

use crate::{DataPaginator, ExternalUpdates, IndexedData, PaginatorState, SourceEvent, Turn};

/// A page and the paginator state it was sliced with.
pub struct Snapshot<T> {
	pub page: IndexedData<T>,
	pub state: PaginatorState<T>,
}

impl<T> Clone for Snapshot<T> {
	fn clone(&self) -> Self {
		Self {
			page: IndexedData::clone(&self.page),
			state: self.state.clone(),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Snapshot").field("page", &self.page).field("state", &self.state).finish()
	}
}

/// Units, combinators and reducer wired into one synchronous engine.
pub struct Pipeline<T> {
	updates: ExternalUpdates<T>,
	paginator: DataPaginator<T>,
}

impl<T: 'static> Pipeline<T> {
	/// Builds the engine and folds the startup emission.
	pub fn new(initial_page_size: Option<usize>) -> Self {
		let mut updates = ExternalUpdates::new();
		let mut paginator = DataPaginator::new(initial_page_size);
		paginator.reduce(updates.initial());
		Self { updates, paginator }
	}

	/// Applies one event. Returns true if the view was recomputed.
	pub fn apply(&mut self, event: SourceEvent<T>) -> bool {
		let input = event.input();
		let Some(next) = self.updates.apply(event) else {
			return false;
		};
		let state = &self.paginator.reduce(next).paginator_state;
		tracing::trace!(
			input = input.as_str(),
			length = state.length,
			page_index = state.page_index,
			page_size = state.page_size,
			anchor_index = state.anchor_index,
			"pipeline.applied"
		);
		true
	}

	/// Applies a turn's events in application order and returns how many recomputed the view.
	pub fn apply_turn(&mut self, turn: Turn<T>) -> usize {
		let mut applied = 0;
		for event in turn.into_ordered() {
			if self.apply(event) {
				applied += 1;
			}
		}
		applied
	}

	/// Latest paginator state.
	pub fn state(&self) -> &PaginatorState<T> {
		self.paginator.state()
	}

	/// Records on the current page.
	pub fn page(&self) -> IndexedData<T> {
		self.paginator.page()
	}

	/// Current page with its paginator state.
	pub fn snapshot(&self) -> Snapshot<T> {
		Snapshot {
			page: self.paginator.page(),
			state: self.paginator.state().clone(),
		}
	}

	/// Full filtered and sorted data behind the current page.
	pub fn data(&self) -> &IndexedData<T> {
		&self.paginator.current().data
	}

	pub fn updates(&self) -> &ExternalUpdates<T> {
		&self.updates
	}
}

#[cfg(test)]
mod tests;
