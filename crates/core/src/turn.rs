use std::fmt;

use crate::{Filter, InputKind, PageIndex, PageSize, SortCriterion};

/// One event from any of the five inputs.
pub enum SourceEvent<T> {
	Data(Vec<T>),
	Filter(Filter<T>),
	Sort(SortCriterion<T>),
	PageSize(PageSize),
	PageIndex(PageIndex),
}

impl<T> SourceEvent<T> {
	/// The input the event arrived on.
	pub const fn input(&self) -> InputKind {
		match self {
			Self::Data(_) => InputKind::Data,
			Self::Filter(_) => InputKind::Filter,
			Self::Sort(_) => InputKind::Sort,
			Self::PageSize(_) => InputKind::PageSize,
			Self::PageIndex(_) => InputKind::PageIndex,
		}
	}

	pub const fn is_data(&self) -> bool {
		matches!(self, Self::Data(_))
	}
}

impl<T> fmt::Debug for SourceEvent<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Data(data) => f.debug_struct("Data").field("len", &data.len()).finish(),
			Self::Filter(filter) => f.debug_tuple("Filter").field(filter).finish(),
			Self::Sort(criterion) => f.debug_tuple("Sort").field(criterion).finish(),
			Self::PageSize(event) => f.debug_tuple("PageSize").field(event).finish(),
			Self::PageIndex(event) => f.debug_tuple("PageIndex").field(event).finish(),
		}
	}
}

/// Events observed in one scheduling turn.
///
/// Data replacements are applied after every other event of the same turn, so a same-turn filter,
/// sort or page request is resolved against the previous data and the data-driven re-anchoring is
/// the most recent state. Order within each group is arrival order.
pub struct Turn<T> {
	events: Vec<SourceEvent<T>>,
}

impl<T> Default for Turn<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Turn<T> {
	pub fn new() -> Self {
		Self { events: Vec::new() }
	}

	pub fn push(&mut self, event: SourceEvent<T>) {
		self.events.push(event);
	}

	pub fn len(&self) -> usize {
		self.events.len()
	}

	pub fn is_empty(&self) -> bool {
		self.events.is_empty()
	}

	/// Events in application order.
	pub fn into_ordered(self) -> impl Iterator<Item = SourceEvent<T>> {
		let (data, other): (Vec<_>, Vec<_>) = self.events.into_iter().partition(SourceEvent::is_data);
		other.into_iter().chain(data)
	}
}

impl<T> FromIterator<SourceEvent<T>> for Turn<T> {
	fn from_iter<I: IntoIterator<Item = SourceEvent<T>>>(iter: I) -> Self {
		Self {
			events: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn data_events_move_last_in_arrival_order() {
		let turn: Turn<u8> = [
			SourceEvent::Data(vec![1]),
			SourceEvent::PageSize(PageSize::new(2)),
			SourceEvent::Data(vec![2, 2]),
			SourceEvent::Filter(Filter::accept_all()),
		]
		.into_iter()
		.collect();

		let order: Vec<_> = turn
			.into_ordered()
			.map(|event| match event {
				SourceEvent::Data(data) => format!("data:{}", data.len()),
				other => other.input().as_str().to_string(),
			})
			.collect();
		assert_eq!(order, ["page size", "filter", "data:1", "data:2"]);
	}
}
