//! Cookie categories the user consents to independently

use crate::error::{ConsentError, ConsentResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ANALYTICS: &str = "analytics";
pub const TRACKING: &str = "tracking";
pub const MARKETING: &str = "marketing";
pub const SOCIAL_MEDIA: &str = "social_media";

/// Categories used when none are configured, in display order.
pub const DEFAULT_CATEGORIES: [&str; 4] = [ANALYTICS, TRACKING, MARKETING, SOCIAL_MEDIA];

/// A validated cookie category name.
///
/// The name doubles as the form field name, so it is restricted to ASCII
/// alphanumerics and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
	/// Create a category from a name
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::Category;
	///
	/// let category = Category::new("analytics").unwrap();
	/// assert_eq!(category.as_str(), "analytics");
	///
	/// assert!(Category::new("").is_err());
	/// assert!(Category::new("ad tracking").is_err());
	/// ```
	pub fn new(name: impl Into<String>) -> ConsentResult<Self> {
		let name = name.into();
		if is_valid_name(&name) {
			Ok(Self(name))
		} else {
			Err(ConsentError::InvalidCategory(name))
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}
}

/// Parse a list of names into categories, rejecting invalid and repeated names.
///
/// # Examples
///
/// ```
/// use cookie_consent_forms::category::parse_categories;
///
/// let categories = parse_categories(["analytics", "marketing"]).unwrap();
/// assert_eq!(categories.len(), 2);
///
/// assert!(parse_categories(["analytics", "analytics"]).is_err());
/// ```
pub fn parse_categories<I, S>(names: I) -> ConsentResult<Vec<Category>>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let mut categories: Vec<Category> = Vec::new();
	for name in names {
		let category = Category::new(name)?;
		if categories.contains(&category) {
			return Err(ConsentError::DuplicateCategory(category.into_inner()));
		}
		categories.push(category);
	}
	Ok(categories)
}

/// The four categories shipped as defaults.
pub fn default_categories() -> Vec<Category> {
	DEFAULT_CATEGORIES
		.iter()
		.map(|name| Category((*name).to_string()))
		.collect()
}

fn is_valid_name(name: &str) -> bool {
	!name.is_empty()
		&& name
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Category {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl FromStr for Category {
	type Err = ConsentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl TryFrom<String> for Category {
	type Error = ConsentError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl TryFrom<&str> for Category {
	type Error = ConsentError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<Category> for String {
	fn from(category: Category) -> Self {
		category.0
	}
}
