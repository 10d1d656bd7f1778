use std::io;
use async_net::unix::UnixStream;
use futures_lite::AsyncWriteExt;

pub struct Stream {
	stream: UnixStream,
}

impl Stream {
	pub fn new(stream: UnixStream) -> Stream {
		Stream { stream }
	}

	pub async fn write(&mut self, buf: &[u8]) -> io::Result<()> {
		self.stream.write_all(buf).await
	}
}
