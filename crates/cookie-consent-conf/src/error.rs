use cookie_consent_forms::ConsentError;

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid value for {key}: {value:?}")]
	InvalidValue { key: String, value: String },

	#[error("Parse error: {0}")]
	Parse(String),
}

/// Error raised while assembling [`ConsentSettings`](crate::ConsentSettings)
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},

	#[error("Invalid settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("Settings validation failed: {0}")]
	Validation(#[from] ConsentError),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
