//! Error types for building and wiring a source.

use thiserror::Error;

/// Errors returned by [`crate::DataSource`] and [`crate::SourceConfig`].
#[derive(Debug, Error)]
pub enum Error {
	/// An input was connected twice or after teardown.
	#[error(transparent)]
	Core(#[from] folio_core::Error),

	/// The configuration text is not valid TOML for [`crate::SourceConfig`].
	#[error("config parse error: {0}")]
	Config(#[from] toml::de::Error),

	/// The configuration parsed but holds an unusable value.
	#[error("invalid config: {0}")]
	InvalidConfig(String),

	/// The fallback runtime for sources built outside tokio could not be started.
	#[error("failed to start fallback runtime: {0}")]
	Runtime(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
