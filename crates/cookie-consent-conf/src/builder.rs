use crate::error::{SettingsError, SettingsResult};
use crate::settings::ConsentSettings;
use crate::sources::{ConfigSource, DefaultSource, EnvSource, TomlSource};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::PathBuf;

/// Merges configuration sources into [`ConsentSettings`].
///
/// Sources are applied from lowest to highest priority; a later source
/// replaces whole keys, lists included. Sources with equal priority apply in
/// the order they were added.
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Builder seeded with the built-in defaults
	pub fn new() -> Self {
		Self {
			sources: vec![Box::new(DefaultSource)],
		}
	}

	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Defaults, then the TOML file at `path` if it exists, then
	/// `COOKIE_CONSENT_*` environment variables
	pub fn standard(path: impl Into<PathBuf>) -> Self {
		Self::new()
			.add_source(TomlSource::file(path))
			.add_source(EnvSource::new())
	}

	/// Load every source, merge and validate
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_conf::{SettingsBuilder, Theme};
	/// use cookie_consent_conf::sources::{EnvSource, TomlSource};
	///
	/// let settings = SettingsBuilder::new()
	///     .add_source(EnvSource::new().with_vars([("COOKIE_CONSENT_THEME", "dark")]))
	///     .add_source(TomlSource::inline("theme = \"light\"\nsimplified = true"))
	///     .build()
	///     .unwrap();
	///
	/// assert_eq!(settings.theme, Theme::Dark);
	/// assert!(settings.simplified);
	/// assert_eq!(settings.categories.len(), 4);
	/// ```
	pub fn build(mut self) -> SettingsResult<ConsentSettings> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged: IndexMap<String, Value> = IndexMap::new();
		for source in &self.sources {
			let values = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"applied consent settings source"
			);
			merged.extend(values);
		}

		let settings: ConsentSettings =
			serde_json::from_value(Value::Object(merged.into_iter().collect()))?;
		settings.validate()?;
		Ok(settings)
	}
}

impl Default for SettingsBuilder {
	fn default() -> Self {
		Self::new()
	}
}
