use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use serde::{Serialize, Deserialize};
use crate::Error;
use crate::display::{self, Token};

pub struct Config {
	pub duration: Duration,
	pub autostart: bool,
	pub format: Vec<Token>,
	pub overrides: HashMap<String, Vec<Token>>,
}

#[derive(Serialize, Deserialize)]
pub struct ConfigBuilder {
	#[serde(with = "humantime_serde")]
	#[serde(default)]
	duration: Duration,
	#[serde(default)]
	autostart: bool,
	#[serde(default = "ConfigBuilder::format")]
	format: String,
	#[serde(default)]
	overrides: HashMap<String, String>,
}

impl ConfigBuilder {
	pub fn load(path: &str) -> Result<ConfigBuilder, Error> {
		let raw = fs::read_to_string(path).unwrap_or_else(|err| {
			log::info!("config file {} not read: {}; using defaults", path, err);
			String::new()
		});
		Ok(Self::parse(&raw)?)
	}

	fn parse(raw: &str) -> Result<ConfigBuilder, toml::de::Error> {
		let de = toml::Deserializer::new(raw);
		serde_ignored::deserialize(de, |path| log::warn!("unused config key: {}", path))
	}

	pub fn build(self) -> Config {
		Config {
			duration: self.duration,
			autostart: self.autostart,
			format: display::parse(&self.format),
			overrides: self.overrides.into_iter()
				.map(|(name, format)| (name, display::parse(&format)))
				.collect(),
		}
	}

	fn format() -> String {
		"{time}\n".into()
	}
}
