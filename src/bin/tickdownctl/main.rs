use std::io::{self, Read, Write};
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use argh::FromArgs;
use thiserror::Error;
use tickdown::{get_socket_path, Command};

fn main() -> Result<(), Error> {
	let args: Args = argh::from_env();
	let command = match args.command {
		Some(command) => command,
		None => return Ok(()),
	};

	let mut stream = UnixStream::connect(&args.socket)?;
	stream.write_all(&bincode::serialize(&command)?)?;
	stream.shutdown(Shutdown::Write)?;

	match command {
		Command::Fetch(_) => {
			let mut reply = String::new();
			stream.read_to_string(&mut reply)?;
			println!("{}", reply);
		}
		Command::Listen(_) => relay(stream)?,
		_ => {}
	}

	Ok(())
}

/// Copies null-terminated updates from the daemon to stdout, one chunk at
/// a time, until the daemon goes away.
fn relay(mut stream: UnixStream) -> Result<(), Error> {
	let mut stdout = io::stdout();
	let mut buffer = [0; 256];
	let mut pending = Vec::new();
	loop {
		let n = stream.read(&mut buffer)?;
		if n == 0 {
			return Ok(());
		}
		pending.extend_from_slice(&buffer[..n]);
		while let Some(end) = pending.iter().position(|&b| b == 0) {
			stdout.write_all(&pending[..end])?;
			stdout.flush()?;
			pending.drain(..=end);
		}
	}
}

#[derive(FromArgs)]
/// Control a running tickdown daemon.
struct Args {
	/// specifies a socket file.
	#[argh(option, short = 's', default = "get_socket_path()")]
	socket: String,

	#[argh(subcommand)]
	command: Option<Command>,
}

#[derive(Error, Debug)]
enum Error {
	#[error("IO error: {0}")]
	Io(#[from] io::Error),
	#[error("serialization error: {0}")]
	Ser(#[from] bincode::Error),
}
