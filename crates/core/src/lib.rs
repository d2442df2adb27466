//! Anchor-stable view engine for paginated, filtered and sorted collections.
//!
//! Five independent event sources drive the view: raw data replacements, filter predicates,
//! sort criteria, page sizes and page indices. Each source is owned by a small unit that turns
//! its events into a [`Prescription`], a deferred update of the [`PaginatorState`]. Two
//! combinators merge the units into one ordered stream of [`DataAndPrescription`] pairs:
//!
//! - [`FilteredSortedData`]: data, filter and sort. Whichever source fires recomputes the derived
//!   data from the latest value of the other two.
//! - [`PaginationEvents`]: page size and page index.
//!
//! [`ExternalUpdates`] merges both into the canonical stream, and [`DataPaginator`] folds it into
//! paginator state and slices the current page. [`Pipeline`] wires the whole chain together.
//!
//! The anchor is what keeps the page stable. Every prescription that changes positions (new data,
//! a new filter, a new ordering) relocates the remembered anchor element with a lower-bound binary
//! search ([`find_anchor_index`]) instead of reusing the old page index.
//!
//! Nothing in this crate is asynchronous. The `folio-source` crate runs a [`Pipeline`] behind an
//! event loop fed by input channels.

mod anchor;
mod data;
mod error;
mod external;
mod filter;
mod filtered_sorted;
mod indexed;
mod pagination;
mod paginator;
mod pipeline;
mod port;
mod prescription;
mod sort;
mod turn;

pub use anchor::{binary_search, find_anchor_index};
pub use data::DataUnit;
pub use error::{Error, Result};
pub use external::ExternalUpdates;
pub use filter::{Filter, FilterUnit};
pub use filtered_sorted::FilteredSortedData;
pub use indexed::{Indexed, IndexedData};
pub use pagination::{PageIndex, PageIndexUnit, PageSize, PageSizeUnit, PaginationEvents};
pub use paginator::{DataAndPaginatorState, DataPaginator, PaginatorState, slice_page};
pub use pipeline::{Pipeline, Snapshot};
pub use port::{InputKind, InputPorts, Port};
pub use prescription::{DataAndPrescription, PaginatorStateUpdate, Prescription};
pub use sort::{CompareFn, Comparator, INDEX_KEY, SortCriterion, SortDirection, SortUnit};
pub use turn::{SourceEvent, Turn};
