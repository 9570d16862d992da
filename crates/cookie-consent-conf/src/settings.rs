//! Cookie consent settings

use cookie_consent_forms::category::DEFAULT_CATEGORIES;
use cookie_consent_forms::{
	Category, ConsentChecker, ConsentFormBuilder, ConsentResult, parse_categories,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keys understood by [`ConsentSettings`].
pub const SETTINGS_KEYS: [&str; 5] = [
	"categories",
	"simplified",
	"csrf_protection",
	"theme",
	"position",
];

/// Colour scheme of the consent banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	#[default]
	Light,
	Dark,
}

/// Where the consent banner is placed on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
	Top,
	#[default]
	Bottom,
}

impl fmt::Display for Theme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Light => f.write_str("light"),
			Self::Dark => f.write_str("dark"),
		}
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Top => f.write_str("top"),
			Self::Bottom => f.write_str("bottom"),
		}
	}
}

/// Settings of the consent form.
///
/// `theme` and `position` are only read by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsentSettings {
	pub categories: Vec<String>,
	pub simplified: bool,
	pub csrf_protection: bool,
	pub theme: Theme,
	pub position: Position,
}

impl Default for ConsentSettings {
	fn default() -> Self {
		Self {
			categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
			simplified: false,
			csrf_protection: true,
			theme: Theme::default(),
			position: Position::default(),
		}
	}
}

impl ConsentSettings {
	/// Validated categories, in configured order
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_conf::ConsentSettings;
	///
	/// let settings = ConsentSettings::default();
	/// let names: Vec<String> = settings
	///     .categories()
	///     .unwrap()
	///     .into_iter()
	///     .map(|c| c.to_string())
	///     .collect();
	/// assert_eq!(names, vec!["analytics", "tracking", "marketing", "social_media"]);
	/// ```
	pub fn categories(&self) -> ConsentResult<Vec<Category>> {
		parse_categories(self.categories.iter().cloned())
	}

	/// Check the settings can produce a form
	pub fn validate(&self) -> ConsentResult<()> {
		self.categories().map(|_| ())
	}

	/// Create a form builder configured from these settings
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_conf::ConsentSettings;
	/// use cookie_consent_forms::NoConsent;
	///
	/// let settings = ConsentSettings {
	///     simplified: true,
	///     ..ConsentSettings::default()
	/// };
	/// let builder = settings.form_builder(NoConsent).unwrap();
	/// assert!(builder.is_simplified());
	/// assert_eq!(builder.categories().len(), 4);
	/// ```
	pub fn form_builder<C: ConsentChecker>(&self, checker: C) -> ConsentResult<ConsentFormBuilder<C>> {
		Ok(ConsentFormBuilder::new(self.categories()?, checker)?
			.simplified(self.simplified)
			.with_csrf_protection(self.csrf_protection))
	}
}
