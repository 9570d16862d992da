//! Configuration sources for layered settings
//!
//! Sources are merged in priority order (environment variables > TOML
//! files > defaults).

use crate::error::SourceError;
use crate::settings::{ConsentSettings, SETTINGS_KEYS};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Prefix of the environment variables read by [`EnvSource::new`].
pub const ENV_PREFIX: &str = "COOKIE_CONSENT_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Built-in defaults of [`ConsentSettings`]
#[derive(Debug, Default)]
pub struct DefaultSource;

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		match serde_json::to_value(ConsentSettings::default())? {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Err(SourceError::Parse("Expected object for defaults".to_string())),
		}
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Defaults".to_string()
	}
}

/// TOML configuration, from a file or an in-memory document
pub struct TomlSource {
	origin: TomlOrigin,
}

enum TomlOrigin {
	File(PathBuf),
	Inline(String),
}

impl TomlSource {
	/// Read settings from a TOML file. A missing file contributes nothing.
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_conf::sources::{ConfigSource, TomlSource};
	///
	/// let source = TomlSource::file("/nonexistent/cookie_consent.toml");
	/// assert!(source.load().unwrap().is_empty());
	/// ```
	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self {
			origin: TomlOrigin::File(path.into()),
		}
	}

	/// Read settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_conf::sources::{ConfigSource, TomlSource};
	///
	/// let source = TomlSource::inline("simplified = true");
	/// let values = source.load().unwrap();
	/// assert_eq!(values.get("simplified"), Some(&serde_json::json!(true)));
	/// ```
	pub fn inline(content: impl Into<String>) -> Self {
		Self {
			origin: TomlOrigin::Inline(content.into()),
		}
	}
}

impl ConfigSource for TomlSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let content = match &self.origin {
			TomlOrigin::File(path) => {
				if !path.exists() {
					return Ok(IndexMap::new());
				}
				fs::read_to_string(path)?
			}
			TomlOrigin::Inline(content) => content.clone(),
		};

		let table: toml::Table = toml::from_str(&content)?;
		let json_value = serde_json::to_value(table)?;

		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		match &self.origin {
			TomlOrigin::File(path) => format!("TOML file: {}", path.display()),
			TomlOrigin::Inline(_) => "TOML document".to_string(),
		}
	}
}

/// Environment variable configuration source
///
/// `COOKIE_CONSENT_CATEGORIES` is a comma-separated list; boolean keys
/// accept `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`. Variables that
/// do not name a settings key are ignored.
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	pub fn new() -> Self {
		Self::with_prefix(ENV_PREFIX)
	}

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			vars: None,
		}
	}

	/// Read from the given variables instead of the process environment
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_conf::sources::{ConfigSource, EnvSource};
	/// use serde_json::json;
	///
	/// let source = EnvSource::new().with_vars([
	///     ("COOKIE_CONSENT_CATEGORIES", "analytics, marketing"),
	///     ("COOKIE_CONSENT_SIMPLIFIED", "yes"),
	///     ("PATH", "/usr/bin"),
	/// ]);
	/// let values = source.load().unwrap();
	/// assert_eq!(values.get("categories"), Some(&json!(["analytics", "marketing"])));
	/// assert_eq!(values.get("simplified"), Some(&json!(true)));
	/// assert_eq!(values.len(), 2);
	/// ```
	pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.vars = Some(
			vars.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		);
		self
	}

	fn vars(&self) -> Vec<(String, String)> {
		match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (key, value) in self.vars() {
			let Some(stripped) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let lower_key = stripped.to_lowercase();
			if !SETTINGS_KEYS.contains(&lower_key.as_str()) {
				continue;
			}

			let parsed_value = match lower_key.as_str() {
				"categories" => Value::Array(
					value
						.split(',')
						.map(str::trim)
						.filter(|s| !s.is_empty())
						.map(|s| Value::String(s.to_string()))
						.collect(),
				),
				"simplified" | "csrf_protection" => Value::Bool(parse_bool(&key, &value)?),
				_ => Value::String(value.trim().to_lowercase()),
			};

			config.insert(lower_key, parsed_value);
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SourceError> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(SourceError::InvalidValue {
			key: key.to_string(),
			value: value.to_string(),
		}),
	}
}
