//! Error types for input wiring.

use thiserror::Error;

use crate::InputKind;

/// Usage errors raised while wiring inputs.
///
/// These are programmer errors, reported eagerly from the connect call rather than surfacing
/// later as runtime faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
	/// The input already has a producer attached.
	#[error("{input} input has already been connected")]
	AlreadyConnected {
		/// The input that was connected twice.
		input: InputKind,
	},

	/// The input was closed by a disconnect and cannot be reused.
	#[error("{input} input was disconnected; create a new source to reconnect")]
	Disconnected {
		/// The input that was connected after teardown.
		input: InputKind,
	},
}

/// Result type for input wiring.
pub type Result<T> = std::result::Result<T, Error>;
