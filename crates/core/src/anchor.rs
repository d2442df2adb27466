//! Anchor repositioning.
//!
//! The anchor is the record the user was last looking at. After any mutation of the derived data
//! it is located again by binary search under the current ordering, so the page that contains it
//! stays on screen.

use std::cmp::Ordering;

/// Binary search for `anchor` in `data`, which must be ordered by `compare`.
///
/// Returns the position of an element comparing equal to `anchor`, or the lower bound (the number
/// of elements ordered strictly before it) when there is none. The lower bound may equal
/// `data.len()`.
pub fn binary_search<T>(data: &[T], compare: impl Fn(&T, &T) -> Ordering, anchor: &T) -> usize {
	let mut start = 0;
	// Exclusive end, so an empty tail never underflows.
	let mut end = data.len();
	while start < end {
		let mid = start + (end - 1 - start) / 2;
		match compare(&data[mid], anchor) {
			Ordering::Less => start = mid + 1,
			Ordering::Greater => end = mid,
			Ordering::Equal => return mid,
		}
	}
	start
}

/// Index the remembered anchor element occupies in `data`.
///
/// Without an anchor the view starts at the top. An anchor ordered after every element is clamped
/// to the last one, and empty data always yields zero.
pub fn find_anchor_index<T>(data: &[T], compare: impl Fn(&T, &T) -> Ordering, anchor: Option<&T>) -> usize {
	let Some(anchor) = anchor else {
		return 0;
	};
	let index = binary_search(data, compare, anchor);
	if index == data.len() { data.len().saturating_sub(1) } else { index }
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	fn by_value(a: &f64, b: &f64) -> Ordering {
		a.total_cmp(b)
	}

	#[rstest]
	#[case(&[0.0, 1.0, 2.0, 3.0], 0.0, 0)]
	#[case(&[0.0, 1.0, 2.0, 3.0], 3.0, 3)]
	#[case(&[0.0, 1.0, 2.0, 3.0], -1.0, 0)]
	#[case(&[0.0, 1.0, 2.0, 3.0], 4.0, 4)]
	#[case(&[0.0, 1.0, 2.0, 3.0], 0.5, 1)]
	#[case(&[0.0, 1.0, 2.0, 3.0], 2.5, 3)]
	#[case(&[0.0, 1.0, 2.0, 3.0, 4.0], 4.5, 5)]
	#[case(&[0.0, 1.0, 2.0, 3.0, 4.0], 1.5, 2)]
	#[case(&[0.0], 0.0, 0)]
	#[case(&[0.0], -1.0, 0)]
	#[case(&[0.0], 1.0, 1)]
	#[case(&[], 23.0, 0)]
	fn binary_search_returns_match_or_lower_bound(#[case] data: &[f64], #[case] anchor: f64, #[case] expected: usize) {
		assert_eq!(binary_search(data, by_value, &anchor), expected);
	}

	#[rstest]
	#[case(&[0.0, 1.0, 2.0, 3.0], Some(2.5), 3)]
	#[case(&[0.0, 1.0, 2.0, 3.0], Some(-1.0), 0)]
	#[case(&[0.0, 1.0, 2.0, 3.0], Some(4.0), 3)]
	#[case(&[0.0, 1.0, 2.0, 3.0], None, 0)]
	#[case(&[], Some(7.0), 0)]
	fn anchor_index_clamps_to_data(#[case] data: &[f64], #[case] anchor: Option<f64>, #[case] expected: usize) {
		assert_eq!(find_anchor_index(data, by_value, anchor.as_ref()), expected);
	}

	#[test]
	fn searches_records_by_projected_key() {
		struct Row {
			value: f64,
		}
		let rows = [Row { value: 0.0 }, Row { value: 1.0 }, Row { value: 2.0 }];
		let anchor = Row { value: 1.5 };
		assert_eq!(binary_search(&rows, |a, b| a.value.total_cmp(&b.value), &anchor), 2);
	}

	proptest! {
		#[test]
		fn binary_search_is_lower_bound(mut data in proptest::collection::vec(-1000i32..1000, 0..64), anchor in -1100i32..1100) {
			data.sort_unstable();
			data.dedup();
			let expected = data.partition_point(|value| *value < anchor);
			prop_assert_eq!(binary_search(&data, i32::cmp, &anchor), expected);
		}

		#[test]
		fn anchor_index_is_in_bounds(mut data in proptest::collection::vec(any::<i32>(), 0..64), anchor in any::<i32>()) {
			data.sort_unstable();
			let index = find_anchor_index(&data, i32::cmp, Some(&anchor));
			prop_assert!(index == 0 || index < data.len());
		}
	}
}
