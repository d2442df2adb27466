use std::fmt::Display;
use std::sync::Arc;

use folio_core::{Filter, InputKind, PageIndex, PageSize, SortCriterion, SourceEvent};
use futures::Stream;

use crate::Result;
use crate::source::Shared;

/// Cloneable handle that connects inputs to a [`crate::DataSource`].
///
/// Every connect call claims its input for good: a second call for the same input, or any call
/// after the source was disconnected, fails with a [`folio_core::Error`] and leaves the given
/// stream unpolled. An input stream that yields an error is logged and stops feeding the view;
/// the other inputs keep running.
pub struct InputPlumber<T> {
	shared: Arc<Shared<T>>,
}

impl<T> Clone for InputPlumber<T> {
	fn clone(&self) -> Self {
		Self {
			shared: Arc::clone(&self.shared),
		}
	}
}

impl<T> std::fmt::Debug for InputPlumber<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("InputPlumber(..)")
	}
}

impl<T: Send + Sync + 'static> InputPlumber<T> {
	pub(crate) fn new(shared: Arc<Shared<T>>) -> Self {
		Self { shared }
	}

	pub fn connect_data<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<Vec<T>, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.shared.connect(InputKind::Data, stream, SourceEvent::Data)
	}

	pub fn connect_filter<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<Filter<T>, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.shared.connect(InputKind::Filter, stream, SourceEvent::Filter)
	}

	pub fn connect_sort<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<SortCriterion<T>, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.shared.connect(InputKind::Sort, stream, SourceEvent::Sort)
	}

	pub fn connect_page_size<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<PageSize, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.shared.connect(InputKind::PageSize, stream, SourceEvent::PageSize)
	}

	pub fn connect_page_index<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<PageIndex, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.shared.connect(InputKind::PageIndex, stream, SourceEvent::PageIndex)
	}
}
