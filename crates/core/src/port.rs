use std::fmt;

use crate::{Error, Result};

/// The five input channels of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
	/// Raw data replacements.
	Data,
	/// Filter predicates.
	Filter,
	/// Sort criteria.
	Sort,
	/// Page size requests.
	PageSize,
	/// Page index requests.
	PageIndex,
}

impl InputKind {
	/// All inputs, in teardown order.
	pub const ALL: [Self; 5] = [Self::Data, Self::Filter, Self::Sort, Self::PageSize, Self::PageIndex];

	/// Stable name used in logs and errors.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Data => "data",
			Self::Filter => "filter",
			Self::Sort => "sort",
			Self::PageSize => "page size",
			Self::PageIndex => "page index",
		}
	}
}

impl fmt::Display for InputKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PortState {
	Idle,
	Connected,
	Closed,
}

/// Connect-once bookkeeping for one input.
#[derive(Debug, Clone)]
pub struct Port {
	input: InputKind,
	state: PortState,
}

impl Port {
	/// Creates an unconnected port.
	pub const fn new(input: InputKind) -> Self {
		Self {
			input,
			state: PortState::Idle,
		}
	}

	/// The input this port guards.
	pub const fn input(&self) -> InputKind {
		self.input
	}

	/// Marks the port connected.
	///
	/// Fails if a producer is already attached or the port was closed.
	pub fn connect(&mut self) -> Result<()> {
		match self.state {
			PortState::Idle => {
				self.state = PortState::Connected;
				Ok(())
			}
			PortState::Connected => Err(Error::AlreadyConnected { input: self.input }),
			PortState::Closed => Err(Error::Disconnected { input: self.input }),
		}
	}

	/// Closes the port. Returns true if a producer was attached.
	pub fn close(&mut self) -> bool {
		let was_connected = self.state == PortState::Connected;
		self.state = PortState::Closed;
		was_connected
	}

	/// Returns true while a producer is attached.
	pub fn is_connected(&self) -> bool {
		self.state == PortState::Connected
	}

	/// Returns true once the port has been closed.
	pub fn is_closed(&self) -> bool {
		self.state == PortState::Closed
	}
}

/// Ports for all five inputs of a view.
#[derive(Debug, Clone)]
pub struct InputPorts {
	ports: [Port; 5],
	closed: bool,
}

impl Default for InputPorts {
	fn default() -> Self {
		Self::new()
	}
}

impl InputPorts {
	/// Creates a set of unconnected ports.
	pub const fn new() -> Self {
		Self {
			ports: [
				Port::new(InputKind::Data),
				Port::new(InputKind::Filter),
				Port::new(InputKind::Sort),
				Port::new(InputKind::PageSize),
				Port::new(InputKind::PageIndex),
			],
			closed: false,
		}
	}

	/// Returns the port for `input`.
	pub fn get(&self, input: InputKind) -> &Port {
		&self.ports[Self::slot(input)]
	}

	/// Connects `input`.
	pub fn connect(&mut self, input: InputKind) -> Result<()> {
		self.ports[Self::slot(input)].connect()
	}

	/// Closes every port in teardown order.
	///
	/// Returns the inputs that had producers attached, or `None` if the ports were already
	/// closed by an earlier call.
	pub fn close_all(&mut self) -> Option<Vec<InputKind>> {
		if self.closed {
			return None;
		}
		self.closed = true;
		Some(self.ports.iter_mut().filter_map(|port| port.close().then_some(port.input())).collect())
	}

	/// Returns true once [`Self::close_all`] has run.
	pub fn is_closed(&self) -> bool {
		self.closed
	}

	const fn slot(input: InputKind) -> usize {
		match input {
			InputKind::Data => 0,
			InputKind::Filter => 1,
			InputKind::Sort => 2,
			InputKind::PageSize => 3,
			InputKind::PageIndex => 4,
		}
	}
}
