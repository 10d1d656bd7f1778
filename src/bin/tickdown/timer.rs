use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};
use tickdown::engine::{Scheduler, Snapshot, TickToken};
use crate::Error;
use crate::display::{Readout, Token};
use crate::socket::Stream;

/// The event loop's tick source: at most one armed deadline, polled by the
/// loop between commands. Cancelling clears the cell synchronously, so a
/// cancelled tick can never be observed firing.
pub struct DeadlineScheduler {
	counter: u64,
	deadline: Option<(TickToken, Instant)>,
}

impl DeadlineScheduler {
	pub fn new() -> Self {
		DeadlineScheduler { counter: 0, deadline: None }
	}

	pub fn deadline(&self) -> Option<(TickToken, Instant)> {
		self.deadline
	}
}

impl Scheduler for DeadlineScheduler {
	fn schedule(&mut self, delay: Duration) -> TickToken {
		self.counter += 1;
		let token = TickToken::new(self.counter);
		self.deadline = Some((token, Instant::now() + delay));
		token
	}

	fn cancel(&mut self, token: TickToken) {
		if let Some((pending, _)) = self.deadline {
			if pending == token {
				self.deadline = None;
			}
		}
	}
}

pub struct Writer {
	format: Vec<Token>,
	overrides: HashMap<String, Vec<Token>>,
	streams: Vec<(Stream, Option<String>)>,
	stdout: Option<Stdout>,
	buf: String,
}

impl Writer {
	pub fn new(format: Vec<Token>, overrides: HashMap<String, Vec<Token>>) -> Self {
		Writer {
			format,
			overrides,
			streams: Vec::new(),
			stdout: Some(io::stdout()),
			buf: String::new(),
		}
	}

	pub fn add_stream(&mut self, stream: Stream, overrid: Option<String>) {
		self.streams.push((stream, overrid));
	}

	pub async fn write(&mut self, snapshot: &Snapshot) -> Result<(), Error> {
		if let Some(stdout) = &mut self.stdout {
			self.buf.clear();
			_ = write!(self.buf, "{}", Readout::new(&self.format, snapshot));
			if write!(stdout, "{}", self.buf).and_then(|_| stdout.flush()).is_err() {
				log::warn!("stdout is gone, disabling the stdout readout");
				self.stdout = None;
			}
		}
		let mut i = 0;
		while i < self.streams.len() {
			self.buf.clear();
			let overrid = self.streams[i].1.as_ref().and_then(|o| self.overrides.get(o));
			_ = write!(self.buf, "{}", Readout::new(overrid.unwrap_or(&self.format), snapshot));
			self.buf.push('\0');
			if self.streams[i].0.write(self.buf.as_bytes()).await.is_err() {
				log::warn!("dropping a disconnected listener");
				self.streams.swap_remove(i);
			} else {
				i += 1;
			}
		}
		Ok(())
	}
}
