//! # Cookie Consent
//!
//! Builds the form behind a cookie consent banner and turns its submissions
//! into per-category consent decisions.
//!
//! ## Feature Flags
//!
//! - `forms` - Form building and submission resolution
//! - `conf` - Layered settings (defaults, TOML file, environment)
//! - `full` (default) - All of the above
//!
//! ## Quick Example
//!
//! ```rust
//! use cookie_consent::prelude::*;
//! use std::collections::HashMap;
//! use serde_json::json;
//!
//! let settings = SettingsBuilder::new()
//!     .add_source(cookie_consent::conf::sources::TomlSource::inline(
//!         "categories = [\"analytics\", \"marketing\"]",
//!     ))
//!     .build()
//!     .unwrap();
//!
//! let builder = settings
//!     .form_builder(|c: &Category| c.as_str() == "analytics")
//!     .unwrap();
//! let form = builder.build();
//! assert_eq!(form.initial().get("marketing"), Some(&json!("false")));
//!
//! let mut data = HashMap::new();
//! data.insert("analytics".to_string(), json!("false"));
//! data.insert("marketing".to_string(), json!("true"));
//! data.insert("save".to_string(), json!("save"));
//!
//! let state = builder.resolve_request(&data).unwrap();
//! assert_eq!(state.get_by_name("marketing"), Some(true));
//! ```

#[cfg(feature = "conf")]
pub use cookie_consent_conf as conf;
#[cfg(feature = "forms")]
pub use cookie_consent_forms as forms;

// Re-export forms (forms feature)
#[cfg(feature = "forms")]
pub use cookie_consent_forms::{
	BoundField, Category, ChoiceField, ConsentChecker, ConsentError, ConsentForm,
	ConsentFormBuilder, ConsentResult, ConsentState, FormField, FormOptions, NoConsent,
	SubmitAction, SubmitField, Widget,
};

// Re-export settings (conf feature)
#[cfg(feature = "conf")]
pub use cookie_consent_conf::{
	ConsentSettings, Position, SettingsBuilder, SettingsError, SettingsResult, Theme,
};

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "conf")]
	pub use crate::{ConsentSettings, SettingsBuilder};
	#[cfg(feature = "forms")]
	pub use crate::{
		Category, ConsentChecker, ConsentError, ConsentFormBuilder, ConsentState, NoConsent,
		SubmitAction,
	};
}
