use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use async_io::Timer;
use futures_lite::FutureExt;
use humantime::format_duration;
use tickdown::{Command, FetchArgs, ListenArgs, SetArgs};
use tickdown::engine::{Snapshot, TickToken, TimerEngine};
use crate::Args;
use crate::Error;
use crate::config::Config;
use crate::display::{self, Readout};
use crate::server::Listener;
use crate::socket::Stream;
use crate::timer::{DeadlineScheduler, Writer};

pub struct App {
	listener: Listener,
	engine: TimerEngine<DeadlineScheduler>,
	writer: Writer,
	updates: Rc<RefCell<Option<Snapshot>>>,
}

impl App {
	pub fn new(args: &Args, config: Config) -> Result<App, Error> {
		let listener = Listener::new(&args.socket)?;
		log::info!("listening on {}", args.socket);

		let updates = Rc::new(RefCell::new(None));
		let mut engine = TimerEngine::new(DeadlineScheduler::new());
		let sink = Rc::clone(&updates);
		engine.subscribe(move |snapshot| *sink.borrow_mut() = Some(snapshot.clone()));

		let secs = config.duration.as_secs();
		engine.configure(secs / 3600, secs % 3600 / 60, secs % 60);
		log::info!("countdown set for {}", format_duration(config.duration));
		if config.autostart {
			engine.toggle_start();
		}

		Ok(App {
			listener,
			engine,
			writer: Writer::new(config.format, config.overrides),
			updates,
		})
	}

	pub async fn run(mut self) -> Result<(), Error> {
		self.flush().await?;
		loop {
			let event = match self.engine.scheduler().deadline() {
				Some((token, at)) => tick_at(token, at).or(self.listener.next()).await?,
				None => self.listener.next().await?,
			};
			match event {
				Event::Tick(token) => self.engine.tick(token),
				Event::Command(command, stream) => self.handle(command, stream).await?,
			}
			self.flush().await?;
		}
	}

	async fn handle(&mut self, command: Command, mut stream: Stream) -> Result<(), Error> {
		match command {
			Command::Set(SetArgs { hours, minutes, seconds }) => {
				self.engine.configure(hours, minutes, seconds)
			}
			Command::Pause(_) => if self.engine.running() {
				self.engine.toggle_start();
			}
			Command::Resume(_) => if !self.engine.running() {
				self.engine.toggle_start();
			}
			Command::Toggle(_) => self.engine.toggle_start(),
			Command::Reset(_) => self.engine.reset(),
			Command::Fetch(FetchArgs { format }) => {
				let format = display::parse(&format);
				let reply = format!("{}", Readout::new(&format, &self.engine.snapshot()));
				if stream.write(reply.as_bytes()).await.is_err() {
					log::warn!("fetch client hung up before the reply");
				}
			}
			Command::Listen(ListenArgs { overrid }) => {
				self.writer.add_stream(stream, overrid);
				let snapshot = self.engine.snapshot();
				self.writer.write(&snapshot).await?;
			}
		}
		Ok(())
	}

	async fn flush(&mut self) -> Result<(), Error> {
		let snapshot = self.updates.borrow_mut().take();
		if let Some(snapshot) = snapshot {
			self.writer.write(&snapshot).await?;
		}
		Ok(())
	}
}

async fn tick_at(token: TickToken, at: Instant) -> Result<Event, Error> {
	Timer::at(at).await;
	Ok(Event::Tick(token))
}

pub enum Event {
	Tick(TickToken),
	Command(Command, Stream),
}
