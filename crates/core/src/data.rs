use crate::{Comparator, Indexed, IndexedData, Prescription};

/// Indexes raw emissions and keeps the latest one.
pub struct DataUnit<T> {
	latest: IndexedData<T>,
}

impl<T> Default for DataUnit<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> DataUnit<T> {
	pub fn new() -> Self {
		Self { latest: Vec::new().into() }
	}

	/// Tags every record of `raw` with its position and stores the result.
	///
	/// Indices always run `0..raw.len()`; nothing carries over from earlier emissions.
	pub fn replace(&mut self, raw: Vec<T>) -> IndexedData<T> {
		self.latest = raw.into_iter().enumerate().map(|(index, record)| Indexed::new(index, record)).collect();
		tracing::trace!(len = self.latest.len(), "data.replaced");
		IndexedData::clone(&self.latest)
	}

	/// Latest indexed emission, in emission order.
	pub fn latest(&self) -> &IndexedData<T> {
		&self.latest
	}
}

impl<T: 'static> DataUnit<T> {
	/// A full replacement may invalidate the old anchor position, so the length is recomputed and
	/// the anchor relocated.
	pub fn prescription(comparator: Comparator<T>) -> Prescription<T> {
		Prescription::relocate_anchor(comparator)
	}
}
