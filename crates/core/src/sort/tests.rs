use proptest::prelude::*;

use super::*;
use crate::PaginatorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Row {
	a: i32,
	b: i32,
}

fn rows(values: &[(i32, i32)]) -> Vec<Indexed<Row>> {
	values.iter().enumerate().map(|(index, &(a, b))| Indexed::new(index, Row { a, b })).collect()
}

fn by_a(direction: Option<SortDirection>) -> SortCriterion<Row> {
	SortCriterion::by_key("a", direction, |row: &Row| row.a)
}

fn by_b(direction: Option<SortDirection>) -> SortCriterion<Row> {
	SortCriterion::by_key("b", direction, |row: &Row| row.b)
}

fn keys(unit: &SortUnit<Row>) -> Vec<(String, SortDirection)> {
	unit.comparator().keys().map(|(key, direction)| (key.to_string(), direction)).collect()
}

#[test]
fn starts_with_emission_order() {
	let unit = SortUnit::<Row>::new();
	assert_eq!(keys(&unit), [(INDEX_KEY.to_string(), SortDirection::Ascending)]);
}

#[test]
fn most_recent_criterion_takes_precedence() {
	let mut unit = SortUnit::new();
	unit.update(by_a(Some(SortDirection::Ascending)));
	unit.update(by_b(Some(SortDirection::Descending)));
	unit.update(by_a(Some(SortDirection::Descending)));

	assert_eq!(
		keys(&unit),
		[
			("a".to_string(), SortDirection::Descending),
			("b".to_string(), SortDirection::Descending),
			(INDEX_KEY.to_string(), SortDirection::Ascending),
		]
	);
}

#[test]
fn clearing_drops_the_key() {
	let mut unit = SortUnit::new();
	unit.update(by_a(Some(SortDirection::Ascending)));
	unit.update(SortCriterion::cleared("a"));
	unit.update(SortCriterion::cleared("never-sorted"));
	assert_eq!(keys(&unit), [(INDEX_KEY.to_string(), SortDirection::Ascending)]);
}

#[test]
fn ties_break_by_earlier_criteria_then_index() {
	let mut unit = SortUnit::new();
	unit.update(by_b(Some(SortDirection::Ascending)));
	unit.update(by_a(Some(SortDirection::Descending)));

	let mut data = rows(&[(1, 2), (2, 9), (1, 1), (2, 9)]);
	unit.comparator().sort(&mut data);
	let order: Vec<_> = data.iter().map(Indexed::index).collect();
	assert_eq!(order, [1, 3, 2, 0]);
}

#[test]
fn empty_ordering_falls_back_to_index() {
	let mut unit = SortUnit::new();
	unit.update(SortCriterion::cleared(INDEX_KEY));
	assert_eq!(unit.comparator().keys().count(), 0);

	let data = rows(&[(5, 0), (1, 0)]);
	assert_eq!(unit.comparator().compare(&data[0], &data[1]), Ordering::Less);
	assert_eq!(unit.comparator().compare(&data[1], &data[1]), Ordering::Equal);
}

#[test]
fn resort_repins_remembered_anchor() {
	let data = rows(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
	let mut state = PaginatorState::zero();
	state.length = 4;
	state.page_size = 2;
	state.anchor_index = 2;
	state.anchor_element = Some(data[2].clone());

	let mut unit = SortUnit::new();
	let comparator = unit.update(by_a(Some(SortDirection::Descending))).clone();
	let mut resorted = data.clone();
	comparator.sort(&mut resorted);

	let update = SortUnit::prescription(comparator).apply(&resorted, &state);
	assert_eq!(update.anchor_index, Some(1));
	assert_eq!(update.anchor_element.flatten().map(|row| row.a), Some(2));
	assert_eq!(update.length, None);
}

#[test]
fn resort_without_anchor_pins_record_at_anchor_index() {
	let data = rows(&[(0, 0), (1, 0), (2, 0)]);
	let mut unit = SortUnit::new();
	let comparator = unit.update(by_a(Some(SortDirection::Descending))).clone();
	let mut resorted = data.clone();
	comparator.sort(&mut resorted);

	let update = SortUnit::prescription(comparator).apply(&resorted, &PaginatorState::zero());
	assert_eq!(update.anchor_index, None);
	assert_eq!(update.anchor_element.flatten().map(|row| row.a), Some(2));
}

#[test]
fn direction_parses_short_names() {
	assert_eq!(parse_direction("asc"), SortDirection::Ascending);
	assert_eq!(parse_direction("desc"), SortDirection::Descending);
}

fn parse_direction(name: &str) -> SortDirection {
	use serde::Deserialize;
	use serde::de::IntoDeserializer;
	use serde::de::value::{Error, StrDeserializer};

	let deserializer: StrDeserializer<'_, Error> = name.into_deserializer();
	SortDirection::deserialize(deserializer).unwrap()
}

fn criterion_strategy() -> impl Strategy<Value = (bool, Option<bool>)> {
	(any::<bool>(), proptest::option::of(any::<bool>()))
}

fn build(requests: &[(bool, Option<bool>)]) -> SortUnit<Row> {
	let mut unit = SortUnit::new();
	for &(use_a, direction) in requests {
		let direction = direction.map(|asc| if asc { SortDirection::Ascending } else { SortDirection::Descending });
		unit.update(if use_a { by_a(direction) } else { by_b(direction) });
	}
	unit
}

proptest! {
	#[test]
	fn comparator_is_antisymmetric_and_total(
		requests in proptest::collection::vec(criterion_strategy(), 0..6),
		values in proptest::collection::vec((0i32..4, 0i32..4), 1..12),
	) {
		let unit = build(&requests);
		let data = rows(&values);
		let cmp = unit.comparator();
		for x in &data {
			for y in &data {
				prop_assert_eq!(cmp.compare(x, y), cmp.compare(y, x).reverse());
				prop_assert_eq!(cmp.compare(x, y) == Ordering::Equal, x.index() == y.index());
			}
		}
	}

	#[test]
	fn comparator_is_transitive(
		requests in proptest::collection::vec(criterion_strategy(), 0..6),
		values in proptest::collection::vec((0i32..3, 0i32..3), 1..8),
	) {
		let unit = build(&requests);
		let data = rows(&values);
		let cmp = unit.comparator();
		for x in &data {
			for y in &data {
				for z in &data {
					if cmp.compare(x, y).is_le() && cmp.compare(y, z).is_le() {
						prop_assert!(cmp.compare(x, z).is_le());
					}
				}
			}
		}
	}
}
