mod app;
mod config;
mod display;
mod server;
mod socket;
mod timer;

use std::env;
use std::io;
use async_signal::{Signal, Signals};
use argh::FromArgs;
use futures_lite::{FutureExt, StreamExt};
use log::LevelFilter;
use simplelog::SimpleLogger;
use thiserror::Error;
use tickdown::get_socket_path;
use crate::app::App;
use crate::config::ConfigBuilder;

fn main() -> Result<(), Error> {
	let args: Args = argh::from_env();
	let level = if args.quiet { LevelFilter::Off } else { LevelFilter::Info };
	SimpleLogger::init(level, simplelog::Config::default())?;

	let config = ConfigBuilder::load(&args.config)?.build();
	let app = App::new(&args, config)?;

	async_io::block_on(app.run().or(catch_term_signals()))
}

#[derive(FromArgs)]
/// An hours/minutes/seconds countdown timer daemon.
pub struct Args {
	/// specifies a config file.
	#[argh(option, short = 'c', default = "get_config_path()")]
	config: String,

	/// specifies a socket file.
	#[argh(option, short = 's', default = "get_socket_path()")]
	socket: String,

	/// suppresses all log output.
	#[argh(switch, short = 'q')]
	quiet: bool,
}

fn get_config_path() -> String {
	if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
		xdg_config_home + "/tickdown/tickdown.toml"
	} else if let Ok(home) = env::var("HOME") {
		home + "/.config/tickdown/tickdown.toml"
	} else {
		"~/.config/tickdown/tickdown.toml".into()
	}
}

async fn catch_term_signals() -> Result<(), Error> {
	let mut signals = Signals::new([Signal::Term, Signal::Int, Signal::Quit, Signal::Pipe])?;
	signals.next().await;
	Ok(())
}

#[derive(Error, Debug)]
pub enum Error {
	#[error("IO error: {0}")]
	Io(#[from] io::Error),
	#[error("config error: {0}")]
	Conf(#[from] toml::de::Error),
	#[error("logger error: {0}")]
	Log(#[from] log::SetLoggerError),
}
