use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const DEFAULT_INGRESS_CAPACITY: usize = 1024;
const DEFAULT_FALLBACK_WORKER_THREADS: usize = 1;

/// Construction parameters for a [`crate::DataSource`].
///
/// ```toml
/// initial_page_size = 25
/// ingress_capacity = 256
/// fallback_worker_threads = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
	/// Page size seeded into the paginator before any input arrives.
	pub initial_page_size: Option<usize>,
	/// Capacity of the mailbox shared by all input pumps.
	pub ingress_capacity: usize,
	/// Worker threads of the runtime started for sources created outside tokio. Only the first
	/// such source decides; the runtime is shared afterwards.
	pub fallback_worker_threads: usize,
}

impl Default for SourceConfig {
	fn default() -> Self {
		Self {
			initial_page_size: None,
			ingress_capacity: DEFAULT_INGRESS_CAPACITY,
			fallback_worker_threads: DEFAULT_FALLBACK_WORKER_THREADS,
		}
	}
}

impl SourceConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		if self.ingress_capacity == 0 {
			return Err(Error::InvalidConfig("ingress_capacity must be greater than zero".into()));
		}
		if self.fallback_worker_threads == 0 {
			return Err(Error::InvalidConfig("fallback_worker_threads must be greater than zero".into()));
		}
		Ok(())
	}

	#[must_use]
	pub fn with_initial_page_size(mut self, page_size: usize) -> Self {
		self.initial_page_size = Some(page_size);
		self
	}

	#[must_use]
	pub fn with_ingress_capacity(mut self, capacity: usize) -> Self {
		self.ingress_capacity = capacity;
		self
	}

	#[must_use]
	pub fn with_fallback_worker_threads(mut self, threads: usize) -> Self {
		self.fallback_worker_threads = threads;
		self
	}
}
