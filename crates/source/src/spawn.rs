use std::future::Future;
use std::sync::OnceLock;

use folio_core::InputKind;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use crate::Result;

/// What a spawned source task does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskRole {
	/// The single consumer that owns the pipeline.
	EventLoop,
	/// Forwards one input stream into the mailbox.
	Pump(InputKind),
}

impl TaskRole {
	const fn as_str(self) -> &'static str {
		match self {
			Self::EventLoop => "event_loop",
			Self::Pump(_) => "pump",
		}
	}

	const fn input(self) -> Option<&'static str> {
		match self {
			Self::EventLoop => None,
			Self::Pump(input) => Some(input.as_str()),
		}
	}
}

/// Shared by every source created outside a tokio runtime.
static FALLBACK: OnceLock<Runtime> = OnceLock::new();

/// Runtime a new source runs its tasks on.
///
/// Inside a tokio runtime that is the ambient one. Otherwise it is a process-wide fallback with
/// `fallback_threads` workers; the first source to need it decides the size, later sources reuse
/// it as is.
pub(crate) fn resolve_runtime(fallback_threads: usize) -> Result<Handle> {
	if let Ok(handle) = Handle::try_current() {
		return Ok(handle);
	}
	if let Some(runtime) = FALLBACK.get() {
		return Ok(runtime.handle().clone());
	}

	let runtime = Builder::new_multi_thread()
		.worker_threads(fallback_threads)
		.thread_name("folio-source")
		.enable_all()
		.build()?;
	tracing::debug!(fallback_threads, "source.runtime.fallback_started");
	// A concurrent caller may have won the race; its runtime is kept and ours is dropped.
	Ok(FALLBACK.get_or_init(move || runtime).handle().clone())
}

/// Spawns a source task on `runtime`.
pub(crate) fn spawn<F>(runtime: &Handle, role: TaskRole, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(task = role.as_str(), input = role.input(), "source.spawn");
	runtime.spawn(fut)
}
