//! Input pumps.
//!
//! Each connected input gets one task that forwards its stream into the shared mailbox. The
//! mailbox is FIFO, so per-input order is preserved. A failing or finished input stops only its
//! own pump.

use std::fmt::Display;

use folio_core::{InputKind, SourceEvent};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Converts an input value into the event the pipeline understands.
pub(crate) type IntoEvent<X, T> = fn(X) -> SourceEvent<T>;

/// Forwards `stream` into `tx` until the stream ends, yields an error, the mailbox closes or
/// `cancel` fires.
pub(crate) async fn pump<S, X, E, T>(
	input: InputKind,
	stream: S,
	into_event: IntoEvent<X, T>,
	tx: mpsc::Sender<SourceEvent<T>>,
	cancel: CancellationToken,
) where
	S: Stream<Item = Result<X, E>>,
	E: Display,
{
	let mut stream = std::pin::pin!(stream);
	let mut forwarded = 0usize;
	loop {
		let next = tokio::select! {
			biased;
			_ = cancel.cancelled() => break,
			next = stream.next() => next,
		};
		let value = match next {
			Some(Ok(value)) => value,
			Some(Err(error)) => {
				tracing::warn!(input = input.as_str(), forwarded, %error, "source.input.error");
				break;
			}
			None => {
				tracing::trace!(input = input.as_str(), forwarded, "source.input.completed");
				break;
			}
		};
		let sent = tokio::select! {
			biased;
			_ = cancel.cancelled() => break,
			result = tx.send(into_event(value)) => result,
		};
		if sent.is_err() {
			break;
		}
		forwarded += 1;
	}
	tracing::trace!(input = input.as_str(), forwarded, "source.pump.stopped");
}
