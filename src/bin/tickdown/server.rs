use std::fs;
use std::io;
use std::path::PathBuf;
use async_net::unix::UnixListener;
use futures_lite::AsyncReadExt;
use crate::Error;
use crate::app::Event;
use crate::socket::Stream;

pub struct Listener {
	path: PathBuf,
	listener: UnixListener,
}

impl Listener {
	pub fn new(path: &str) -> io::Result<Listener> {
		Ok(Listener { path: path.into(), listener: UnixListener::bind(path)? })
	}

	/// Accepts connections until one carries a well-formed command.
	/// Malformed commands are logged and dropped at this boundary.
	pub async fn next(&self) -> Result<Event, Error> {
		loop {
			let (mut stream, _) = self.listener.accept().await?;
			let mut buffer = Vec::new();
			if let Err(err) = stream.read_to_end(&mut buffer).await {
				log::warn!("failed reading a command: {}", err);
				continue;
			}
			match bincode::deserialize(&buffer) {
				Ok(command) => return Ok(Event::Command(command, Stream::new(stream))),
				Err(err) => log::warn!("ignoring a malformed command: {}", err),
			}
		}
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		_ = fs::remove_file(&self.path);
	}
}
