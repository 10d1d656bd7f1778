use std::fmt::{self, Display, Formatter};
use tickdown::engine::Snapshot;
use tickdown::format::clock;

#[cfg_attr(test, derive(PartialEq, Debug))]
pub enum Token {
	Time,
	Total,
	Percent,
	State,
	Color(Color),
	Literal(String),
}

#[cfg_attr(test, derive(PartialEq, Debug))]
pub enum Color {
	Black,
	Red,
	Green,
	Yellow,
	Blue,
	Purple,
	Cyan,
	White,
	End,
}

impl Token {
	fn parse(input: &str) -> Option<Self> {
		match input {
			"{time}" => Some(Token::Time),
			"{total}" => Some(Token::Total),
			"{percent}" => Some(Token::Percent),
			"{state}" => Some(Token::State),
			"{black}" => Some(Token::Color(Color::Black)),
			"{red}" => Some(Token::Color(Color::Red)),
			"{green}" => Some(Token::Color(Color::Green)),
			"{yellow}" => Some(Token::Color(Color::Yellow)),
			"{blue}" => Some(Token::Color(Color::Blue)),
			"{purple}" => Some(Token::Color(Color::Purple)),
			"{cyan}" => Some(Token::Color(Color::Cyan)),
			"{white}" => Some(Token::Color(Color::White)),
			"{end}" => Some(Token::Color(Color::End)),
			_ => None,
		}
	}
}

pub fn parse(format: &str) -> Vec<Token> {
	let mut tokens = Vec::new();
	let mut k = 0;
	let mut open = None;

	for (i, c) in format.char_indices() {
		match c {
			'{' => open = Some(i),
			'}' => if let Some(j) = open {
				if let Some(token) = Token::parse(&format[j..=i]) {
					if k != j { tokens.push(Token::Literal(format[k..j].into())) };
					tokens.push(token);
					k = i + 1;
				}
			}
			_ => {},
		}
	}
	if k != format.len() { tokens.push(Token::Literal(format[k..].into())) };

	tokens
}

pub struct Readout<'r> {
	format: &'r [Token],
	snapshot: &'r Snapshot,
}

impl<'r> Readout<'r> {
	pub fn new(format: &'r [Token], snapshot: &'r Snapshot) -> Self {
		Readout { format, snapshot }
	}
}

impl Display for Readout<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		for token in self.format {
			match token {
				Token::Time => f.write_str(&self.snapshot.text)?,
				Token::Total => f.write_str(&clock(self.snapshot.total))?,
				Token::Percent => write!(f, "{}", (self.snapshot.progress * 100.0) as u8)?,
				Token::State => f.write_str(if self.snapshot.running { "PAUSE" } else { "START" })?,
				Token::Color(Color::Black) => f.write_str("\x1b[0;30m")?,
				Token::Color(Color::Red) => f.write_str("\x1b[0;31m")?,
				Token::Color(Color::Green) => f.write_str("\x1b[0;32m")?,
				Token::Color(Color::Yellow) => f.write_str("\x1b[0;33m")?,
				Token::Color(Color::Blue) => f.write_str("\x1b[0;34m")?,
				Token::Color(Color::Purple) => f.write_str("\x1b[0;35m")?,
				Token::Color(Color::Cyan) => f.write_str("\x1b[0;36m")?,
				Token::Color(Color::White) => f.write_str("\x1b[0;37m")?,
				Token::Color(Color::End) => f.write_str("\x1b[0m")?,
				Token::Literal(literal) => f.write_str(literal)?,
			};
		}
		Ok(())
	}
}
