use std::env;
use argh::FromArgs;
use serde::{Serialize, Deserialize};

pub mod engine;
pub mod format;

#[derive(FromArgs, Serialize, Deserialize)]
#[argh(subcommand)]
pub enum Command {
	Set(SetArgs),
	Pause(PauseArgs),
	Resume(ResumeArgs),
	Toggle(ToggleArgs),
	Reset(ResetArgs),
	Fetch(FetchArgs),
	Listen(ListenArgs),
}

#[derive(FromArgs, Serialize, Deserialize)]
/// Set the countdown duration from hour, minute and second components.
#[argh(subcommand, name = "set")]
pub struct SetArgs {
	/// hour component of the duration
	#[argh(positional)]
	pub hours: u64,

	/// minute component of the duration
	#[argh(positional)]
	pub minutes: u64,

	/// second component of the duration
	#[argh(positional)]
	pub seconds: u64,
}

#[derive(FromArgs, Serialize, Deserialize)]
/// Pause the countdown.
#[argh(subcommand, name = "pause")]
pub struct PauseArgs {}

#[derive(FromArgs, Serialize, Deserialize)]
/// Resume a paused countdown.
#[argh(subcommand, name = "resume")]
pub struct ResumeArgs {}

#[derive(FromArgs, Serialize, Deserialize)]
/// Toggle between the running and paused states.
#[argh(subcommand, name = "toggle")]
pub struct ToggleArgs {}

#[derive(FromArgs, Serialize, Deserialize)]
/// Stop the countdown and restore the full configured duration.
#[argh(subcommand, name = "reset")]
pub struct ResetArgs {}

#[derive(FromArgs, Serialize, Deserialize)]
/// Fetch the current timer state in the given format.
#[argh(subcommand, name = "fetch")]
pub struct FetchArgs {
	/// output format
	#[argh(positional)]
	pub format: String,
}

#[derive(FromArgs, Serialize, Deserialize)]
/// Print timer updates continuously, staying in sync with the daemon.
#[argh(subcommand, name = "listen")]
pub struct ListenArgs {
	/// override to apply
	#[argh(option, short = 'o', long = "override")]
	pub overrid: Option<String>,
}

pub fn get_socket_path() -> String {
	if let Ok(xdg_runtime_dir) = env::var("XDG_RUNTIME_DIR") {
		xdg_runtime_dir + "/tickdown.sock"
	} else if let Ok(tmp_dir) = env::var("TMPDIR") {
		tmp_dir + "/tickdown.sock"
	} else {
		"/tmp/tickdown.sock".into()
	}
}
