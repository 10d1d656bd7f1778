pub const DONE_TEXT: &str = "DONE!";

/// Formats a whole second count as a zero-padded `HH:MM:SS` clock.
///
/// # Examples
/// ```
/// let formatted = tickdown::format::clock(1234);
///
/// assert_eq!("00:20:34", formatted);
/// ```
///
/// Hours grow past two digits as needed; minutes and seconds never do.
pub fn clock(secs: u64) -> String {
	let hours = secs / 3600;
	let minutes = (secs % 3600) / 60;
	let seconds = secs - hours * 3600 - minutes * 60;
	format!("{hours:0>2}:{minutes:0>2}:{seconds:0>2}")
}
