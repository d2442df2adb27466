//! Asynchronous front end for the `folio-core` view engine.
//!
//! A [`DataSource`] owns a [`folio_core::Pipeline`] inside a single event-loop task. Each of the
//! five inputs (data, filter, sort, page size, page index) is an arbitrary fallible
//! [`futures::Stream`] forwarded by its own pump task into one bounded mailbox. The event loop
//! batches whatever arrived in the same scheduling turn, applies it with data replacements last,
//! and publishes the resulting page and paginator state through a `tokio::sync::watch` channel.
//!
//! ```no_run
//! use folio_source::{DataSource, SourceConfig};
//! use futures::StreamExt;
//! use futures::channel::mpsc::UnboundedReceiver;
//!
//! async fn show(rows: UnboundedReceiver<Result<Vec<String>, std::io::Error>>) -> folio_source::Result<()> {
//!     let source = DataSource::new(SourceConfig::default().with_initial_page_size(20))?;
//!     source.connect_data(rows)?;
//!     let mut pages = source.page_updates();
//!     while let Some(page) = pages.next().await {
//!         println!("{} rows on this page", page.len());
//!     }
//!     source.disconnect().await;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod plumber;
mod pump;
mod source;
mod spawn;

pub use config::SourceConfig;
pub use error::{Error, Result};
pub use folio_core::{
	Filter, INDEX_KEY, Indexed, IndexedData, InputKind, PageIndex, PageSize, PaginatorState, Snapshot, SortCriterion,
	SortDirection,
};
pub use plumber::InputPlumber;
pub use source::DataSource;
