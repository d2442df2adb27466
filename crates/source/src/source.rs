//! The asynchronous view: input pumps, the event loop and replay-latest outputs.

use std::fmt::Display;
use std::sync::Arc;

use folio_core::{
	Filter, IndexedData, InputKind, InputPorts, PageIndex, PageSize, PaginatorState, Pipeline, Snapshot, SortCriterion,
	SourceEvent, Turn,
};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::pump::{IntoEvent, pump};
use crate::spawn::{TaskRole, resolve_runtime, spawn};
use crate::{InputPlumber, Result, SourceConfig};

struct Wiring {
	ports: InputPorts,
	pumps: Vec<JoinHandle<()>>,
	event_loop: Option<JoinHandle<()>>,
}

pub(crate) struct Shared<T> {
	runtime: Handle,
	tx: mpsc::Sender<SourceEvent<T>>,
	wiring: Mutex<Wiring>,
	pump_cancel: CancellationToken,
	loop_cancel: CancellationToken,
	snapshots: watch::Receiver<Snapshot<T>>,
}

impl<T> Drop for Shared<T> {
	fn drop(&mut self) {
		self.pump_cancel.cancel();
		self.loop_cancel.cancel();
	}
}

impl<T: Send + Sync + 'static> Shared<T> {
	/// Claims the port for `input` and starts its pump.
	pub(crate) fn connect<S, X, E>(&self, input: InputKind, stream: S, into_event: IntoEvent<X, T>) -> Result<()>
	where
		S: Stream<Item = std::result::Result<X, E>> + Send + 'static,
		X: Send + 'static,
		E: Display + Send + 'static,
	{
		let mut wiring = self.wiring.lock();
		wiring.ports.connect(input)?;
		let task = spawn(
			&self.runtime,
			TaskRole::Pump(input),
			pump(input, stream, into_event, self.tx.clone(), self.pump_cancel.clone()),
		);
		wiring.pumps.push(task);
		tracing::debug!(input = input.as_str(), "source.input.connected");
		Ok(())
	}
}

/// A paginated, filtered and sorted view over asynchronously updated data.
///
/// Five input streams feed the view; each may be connected at most once. The current page and
/// paginator state are published as one replay-latest [`Snapshot`], so every observer sees a page
/// together with the state it was sliced with.
///
/// Clones share the same view.
pub struct DataSource<T> {
	shared: Arc<Shared<T>>,
}

impl<T> Clone for DataSource<T> {
	fn clone(&self) -> Self {
		Self {
			shared: Arc::clone(&self.shared),
		}
	}
}

impl<T> std::fmt::Debug for DataSource<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let wiring = self.shared.wiring.lock();
		f.debug_struct("DataSource")
			.field("ports", &wiring.ports)
			.field("pumps", &wiring.pumps.len())
			.finish_non_exhaustive()
	}
}

impl<T: Send + Sync + 'static> DataSource<T> {
	/// Builds a source and starts its event loop.
	///
	/// Outside of a tokio runtime the tasks run on a shared fallback runtime sized by
	/// [`SourceConfig::fallback_worker_threads`].
	pub fn new(config: SourceConfig) -> Result<Self> {
		config.validate()?;
		let runtime = resolve_runtime(config.fallback_worker_threads)?;
		let pipeline = Pipeline::new(config.initial_page_size);
		let (tx, rx) = mpsc::channel(config.ingress_capacity);
		let (publisher, snapshots) = watch::channel(pipeline.snapshot());
		let pump_cancel = CancellationToken::new();
		let loop_cancel = CancellationToken::new();

		let event_loop = spawn(
			&runtime,
			TaskRole::EventLoop,
			run_event_loop(pipeline, rx, publisher, loop_cancel.clone()),
		);
		tracing::debug!(
			initial_page_size = config.initial_page_size,
			ingress_capacity = config.ingress_capacity,
			"source.created"
		);

		Ok(Self {
			shared: Arc::new(Shared {
				runtime,
				tx,
				wiring: Mutex::new(Wiring {
					ports: InputPorts::new(),
					pumps: Vec::new(),
					event_loop: Some(event_loop),
				}),
				pump_cancel,
				loop_cancel,
				snapshots,
			}),
		})
	}

	/// Handle for wiring inputs without owning the source.
	pub fn plumber(&self) -> InputPlumber<T> {
		InputPlumber::new(Arc::clone(&self.shared))
	}

	/// Connects the raw data input. Each item replaces the whole working set.
	pub fn connect_data<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<Vec<T>, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.plumber().connect_data(stream)
	}

	pub fn connect_filter<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<Filter<T>, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.plumber().connect_filter(stream)
	}

	pub fn connect_sort<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<SortCriterion<T>, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.plumber().connect_sort(stream)
	}

	pub fn connect_page_size<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<PageSize, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.plumber().connect_page_size(stream)
	}

	pub fn connect_page_index<S, E>(&self, stream: S) -> Result<()>
	where
		S: Stream<Item = std::result::Result<PageIndex, E>> + Send + 'static,
		E: Display + Send + 'static,
	{
		self.plumber().connect_page_index(stream)
	}

	/// Replay-latest receiver of page and state pairs.
	///
	/// The receiver starts with the current snapshot marked as seen. It reports closed once the
	/// source has been disconnected.
	pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
		self.shared.snapshots.clone()
	}

	/// Latest page and state pair.
	pub fn snapshot(&self) -> Snapshot<T> {
		self.shared.snapshots.borrow().clone()
	}

	/// Records on the latest page.
	pub fn current_page(&self) -> IndexedData<T> {
		IndexedData::clone(&self.shared.snapshots.borrow().page)
	}

	/// Latest paginator state.
	pub fn current_state(&self) -> PaginatorState<T> {
		self.shared.snapshots.borrow().state.clone()
	}

	/// The current page, then every later page until the source is disconnected.
	///
	/// Pages published faster than the stream is polled are collapsed to the latest one.
	pub fn page_updates(&self) -> impl Stream<Item = IndexedData<T>> + Send + Unpin + 'static {
		snapshot_stream(self.subscribe()).map(|snapshot| snapshot.page)
	}

	/// The current paginator state, then every later state until the source is disconnected.
	pub fn state_updates(&self) -> impl Stream<Item = PaginatorState<T>> + Send + Unpin + 'static {
		snapshot_stream(self.subscribe()).map(|snapshot| snapshot.state)
	}

	/// Returns true once [`Self::disconnect`] has run.
	pub fn is_disconnected(&self) -> bool {
		self.shared.wiring.lock().ports.is_closed()
	}

	/// Tears the source down: stops the input pumps, then the event loop, which closes the
	/// outputs.
	///
	/// Events already queued when the pumps stop are discarded. Calling this again is a no-op.
	pub async fn disconnect(&self) {
		let (inputs, pumps, event_loop) = {
			let mut wiring = self.shared.wiring.lock();
			let Some(inputs) = wiring.ports.close_all() else {
				return;
			};
			(inputs, std::mem::take(&mut wiring.pumps), wiring.event_loop.take())
		};

		self.shared.pump_cancel.cancel();
		for pump in pumps {
			let _ = pump.await;
		}

		self.shared.loop_cancel.cancel();
		if let Some(event_loop) = event_loop {
			let _ = event_loop.await;
		}

		let inputs: Vec<_> = inputs.into_iter().map(InputKind::as_str).collect();
		tracing::debug!(?inputs, "source.disconnected");
	}
}

/// Single consumer owning the pipeline.
///
/// One turn is the first pending event plus everything that arrives before the loop is polled
/// again. The turn is applied in [`Turn::into_ordered`] order and published once.
async fn run_event_loop<T>(
	mut pipeline: Pipeline<T>,
	mut rx: mpsc::Receiver<SourceEvent<T>>,
	publisher: watch::Sender<Snapshot<T>>,
	cancel: CancellationToken,
) where
	T: Send + Sync + 'static,
{
	loop {
		let first = tokio::select! {
			biased;
			_ = cancel.cancelled() => break,
			event = rx.recv() => {
				let Some(event) = event else {
					break;
				};
				event
			}
		};

		tokio::task::yield_now().await;
		let mut turn = Turn::new();
		turn.push(first);
		while let Ok(event) = rx.try_recv() {
			turn.push(event);
		}

		let events = turn.len();
		let applied = pipeline.apply_turn(turn);
		if applied > 0 {
			publisher.send_replace(pipeline.snapshot());
		}
		tracing::trace!(events, applied, "source.turn");
	}
	tracing::debug!("source.event_loop.stopped");
}

fn snapshot_stream<T>(mut rx: watch::Receiver<Snapshot<T>>) -> BoxStream<'static, Snapshot<T>>
where
	T: Send + Sync + 'static,
{
	rx.mark_changed();
	futures::stream::unfold(rx, |mut rx| async move {
		rx.changed().await.ok()?;
		let snapshot = rx.borrow_and_update().clone();
		Some((snapshot, rx))
	})
	.boxed()
}
