use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{Filter, INDEX_KEY, Indexed, PageIndex, PageSize, SortCriterion, SortDirection};

fn letters(values: &[&'static str]) -> SourceEvent<&'static str> {
	SourceEvent::Data(values.to_vec())
}

fn page<T: Copy + 'static>(pipeline: &Pipeline<T>) -> Vec<T> {
	pipeline.page().iter().map(|record| *record.record()).collect()
}

fn numbers<T>(state: &PaginatorState<T>) -> (usize, usize, usize, usize) {
	(state.page_index, state.page_size, state.length, state.anchor_index)
}

fn emission_order_descending<T: 'static>() -> SortCriterion<T> {
	SortCriterion::descending(INDEX_KEY, |a: &Indexed<T>, b: &Indexed<T>| a.index().cmp(&b.index()))
}

#[test]
fn starts_empty() {
	let pipeline = Pipeline::<u32>::new(None);
	assert_eq!(numbers(pipeline.state()), (0, 0, 0, 0));
	assert!(pipeline.page().is_empty());
	assert!(pipeline.data().is_empty());

	let pipeline = Pipeline::<u32>::new(Some(10));
	assert_eq!(numbers(pipeline.state()), (0, 10, 0, 0));
}

#[test]
fn resort_keeps_the_anchor_on_screen() {
	let mut pipeline = Pipeline::new(None);
	assert!(pipeline.apply(letters(&["a", "b", "c", "d"])));
	assert_eq!(numbers(pipeline.state()), (0, 4, 4, 0));

	pipeline.apply(SourceEvent::PageSize(PageSize::new(2)));
	assert_eq!(page(&pipeline), ["a", "b"]);

	pipeline.apply(SourceEvent::PageIndex(PageIndex::new(1)));
	assert_eq!(page(&pipeline), ["c", "d"]);
	assert_eq!(pipeline.state().anchor_index, 2);

	pipeline.apply(SourceEvent::Sort(emission_order_descending()));
	assert_eq!(numbers(pipeline.state()), (0, 2, 4, 1));
	assert_eq!(page(&pipeline), ["d", "c"]);
	assert_eq!(pipeline.state().anchor_element.as_ref().map(|anchor| *anchor.record()), Some("c"));
}

#[test]
fn out_of_range_page_is_ignored() {
	let mut pipeline = Pipeline::new(Some(2));
	pipeline.apply(letters(&["a", "b", "c", "d"]));
	pipeline.apply(SourceEvent::PageIndex(PageIndex::new(1)));
	let before = pipeline.snapshot();

	assert!(pipeline.apply(SourceEvent::PageIndex(PageIndex::new(5))));
	let after = pipeline.snapshot();
	assert_eq!(after.state, before.state);
	assert_eq!(after.page, before.page);
}

#[test]
fn filter_relocates_anchor_to_next_visible_record() {
	let mut pipeline = Pipeline::new(Some(3));
	pipeline.apply(SourceEvent::Data((1..=10).collect::<Vec<u32>>()));
	pipeline.apply(SourceEvent::PageIndex(PageIndex::new(2)));
	assert_eq!(page(&pipeline), [7, 8, 9]);

	pipeline.apply(SourceEvent::Filter(Filter::new(|record: &Indexed<u32>| **record % 2 == 0)));
	assert_eq!(numbers(pipeline.state()), (1, 3, 5, 3));
	assert_eq!(page(&pipeline), [8, 10]);
}

#[test]
fn data_replacement_recomputes_length_under_active_filter() {
	let mut pipeline = Pipeline::new(Some(2));
	pipeline.apply(SourceEvent::Filter(Filter::new(|record: &Indexed<u32>| **record >= 10)));
	pipeline.apply(SourceEvent::Data(vec![1, 10, 2, 20, 3, 30]));
	assert_eq!(pipeline.state().length, 3);
	assert_eq!(page(&pipeline), [10, 20]);

	pipeline.apply(SourceEvent::Data(vec![40]));
	assert_eq!(numbers(pipeline.state()), (0, 2, 1, 0));
	assert_eq!(page(&pipeline), [40]);
}

#[test]
fn data_replacement_relocates_remembered_anchor_under_filter() {
	let mut pipeline = Pipeline::new(Some(2));
	pipeline.apply(SourceEvent::Filter(Filter::new(|record: &Indexed<u32>| **record % 2 == 0)));
	pipeline.apply(SourceEvent::Data((1..=8).collect()));
	pipeline.apply(SourceEvent::PageIndex(PageIndex::new(1)));
	assert_eq!(page(&pipeline), [6, 8]);
	assert_eq!(pipeline.state().anchor_element.as_ref().map(Indexed::index), Some(5));

	// The anchor was emitted at position 5; the first visible record at or after that position
	// in the new emission is 8.
	pipeline.apply(SourceEvent::Data(vec![0, 2, 4, 5, 6, 8, 10, 12, 14]));
	assert_eq!(numbers(pipeline.state()), (2, 2, 8, 4));
	assert_eq!(page(&pipeline), [8, 10]);
}

#[test]
fn data_applies_after_same_turn_page_request() {
	let mut pipeline = Pipeline::new(Some(2));
	pipeline.apply(letters(&["a", "b", "c", "d", "e", "f"]));

	let turn: Turn<_> = [letters(&["a", "b"]), SourceEvent::PageIndex(PageIndex::new(2))].into_iter().collect();
	assert_eq!(pipeline.apply_turn(turn), 2);

	// The page request saw six records and anchored on "e"; the new data then clamps it.
	assert_eq!(numbers(pipeline.state()), (0, 2, 2, 1));
	assert_eq!(page(&pipeline), ["a", "b"]);
}

#[test]
fn sort_before_any_data_is_harmless() {
	let mut pipeline = Pipeline::<u32>::new(Some(4));
	pipeline.apply(SourceEvent::Sort(SortCriterion::by_key("value", Some(SortDirection::Descending), |value: &u32| *value)));
	pipeline.apply(SourceEvent::Data(vec![3, 1, 2]));
	assert_eq!(page(&pipeline), [3, 2, 1]);
	assert_eq!(pipeline.updates().filtered_sorted().comparator().keys().count(), 2);
}

#[derive(Debug, Clone)]
enum Op {
	Data(Vec<u8>),
	Filter(u8),
	Sort(Option<bool>),
	PageSize(usize),
	PageIndex(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
	prop_oneof![
		proptest::collection::vec(0u8..50, 0..16).prop_map(Op::Data),
		(1u8..4).prop_map(Op::Filter),
		proptest::option::of(any::<bool>()).prop_map(Op::Sort),
		(0usize..6).prop_map(Op::PageSize),
		(0usize..6).prop_map(Op::PageIndex),
	]
}

fn event(op: Op) -> SourceEvent<u8> {
	match op {
		Op::Data(values) => SourceEvent::Data(values),
		Op::Filter(modulus) => SourceEvent::Filter(Filter::new(move |record: &Indexed<u8>| **record % modulus == 0)),
		Op::Sort(direction) => {
			let direction = direction.map(|asc| if asc { SortDirection::Ascending } else { SortDirection::Descending });
			SourceEvent::Sort(SortCriterion::by_key("value", direction, |value: &u8| *value))
		}
		Op::PageSize(size) => SourceEvent::PageSize(PageSize::new(size)),
		Op::PageIndex(index) => SourceEvent::PageIndex(PageIndex::new(index)),
	}
}

proptest! {
	#[test]
	fn every_step_leaves_a_consistent_view(
		initial in proptest::option::of(0usize..6),
		ops in proptest::collection::vec(op_strategy(), 0..32),
	) {
		let mut pipeline = Pipeline::new(initial);
		for op in ops {
			pipeline.apply(event(op));
			let state = pipeline.state();
			prop_assert!(state.anchor_index == 0 || state.anchor_index < state.length);
			prop_assert_eq!(state.length, pipeline.data().len());
			let expected_page = if state.page_size > 0 { state.anchor_index / state.page_size } else { 0 };
			prop_assert_eq!(state.page_index, expected_page);

			let page = pipeline.page();
			prop_assert!(page.len() <= state.page_size);
			let range = state.page_range(pipeline.data().len());
			prop_assert_eq!(&page[..], &pipeline.data()[range]);
		}
	}
}
