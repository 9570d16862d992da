//! Field descriptions handed to the rendering layer

use crate::action::SubmitAction;
use crate::category::Category;
use serde::Serialize;

pub const CHOICE_TRUE: &str = "true";
pub const CHOICE_FALSE: &str = "false";

const YES_LABEL: &str = "ch_cookie_consent.yes";
const NO_LABEL: &str = "ch_cookie_consent.no";

/// How a field is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
	/// One radio input per choice (an expanded, single-valued choice)
	RadioSelect { choices: Vec<FieldChoice> },
	SubmitButton,
}

/// A selectable option: translation key for the label, submitted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChoice {
	pub label: String,
	pub value: String,
}

impl FieldChoice {
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

/// Maps a consent decision onto the submitted choice value.
///
/// # Examples
///
/// ```
/// use cookie_consent_forms::field::choice_value;
///
/// assert_eq!(choice_value(true), "true");
/// assert_eq!(choice_value(false), "false");
/// ```
pub fn choice_value(allowed: bool) -> &'static str {
	if allowed { CHOICE_TRUE } else { CHOICE_FALSE }
}

/// Allow/deny choice for one cookie category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceField {
	pub category: Category,
	pub widget: Widget,
	pub initial: String,
}

impl ChoiceField {
	/// Create the choice field for a category with its current decision
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::{Category, ChoiceField};
	///
	/// let field = ChoiceField::new(Category::new("analytics").unwrap(), true);
	/// assert_eq!(field.name(), "analytics");
	/// assert_eq!(field.initial, "true");
	/// assert_eq!(field.choices().len(), 2);
	/// ```
	pub fn new(category: Category, allowed: bool) -> Self {
		Self {
			category,
			widget: Widget::RadioSelect {
				choices: vec![
					FieldChoice::new(YES_LABEL, CHOICE_TRUE),
					FieldChoice::new(NO_LABEL, CHOICE_FALSE),
				],
			},
			initial: choice_value(allowed).to_string(),
		}
	}

	pub fn name(&self) -> &str {
		self.category.as_str()
	}

	pub fn choices(&self) -> &[FieldChoice] {
		match &self.widget {
			Widget::RadioSelect { choices } => choices.as_slice(),
			Widget::SubmitButton => &[],
		}
	}

	/// Whether the field pre-selects "allow"
	pub fn is_allowed_initially(&self) -> bool {
		self.initial == CHOICE_TRUE
	}
}

/// Submit button bound to a [`SubmitAction`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitField {
	pub action: SubmitAction,
	pub label: String,
	pub widget: Widget,
	/// HTML attributes, in render order
	pub attrs: Vec<(String, String)>,
}

impl SubmitField {
	pub fn new(action: SubmitAction) -> Self {
		Self {
			action,
			label: action.label().to_string(),
			widget: Widget::SubmitButton,
			attrs: vec![
				("class".to_string(), action.css_class().to_string()),
				("value".to_string(), action.field_name().to_string()),
			],
		}
	}

	pub fn name(&self) -> &str {
		self.action.field_name()
	}

	pub fn attr(&self, key: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}
}

/// A single entry of the consent form, in render order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormField {
	Choice(ChoiceField),
	Submit(SubmitField),
}

impl FormField {
	pub fn name(&self) -> &str {
		match self {
			Self::Choice(field) => field.name(),
			Self::Submit(field) => field.name(),
		}
	}

	pub fn label(&self) -> Option<&str> {
		match self {
			Self::Choice(_) => None,
			Self::Submit(field) => Some(field.label.as_str()),
		}
	}

	pub fn widget(&self) -> &Widget {
		match self {
			Self::Choice(field) => &field.widget,
			Self::Submit(field) => &field.widget,
		}
	}

	/// Pre-filled value; buttons carry none
	pub fn initial(&self) -> Option<&str> {
		match self {
			Self::Choice(field) => Some(field.initial.as_str()),
			Self::Submit(_) => None,
		}
	}

	pub fn as_choice(&self) -> Option<&ChoiceField> {
		match self {
			Self::Choice(field) => Some(field),
			Self::Submit(_) => None,
		}
	}

	pub fn as_submit(&self) -> Option<&SubmitField> {
		match self {
			Self::Choice(_) => None,
			Self::Submit(field) => Some(field),
		}
	}
}

impl From<ChoiceField> for FormField {
	fn from(field: ChoiceField) -> Self {
		Self::Choice(field)
	}
}

impl From<SubmitField> for FormField {
	fn from(field: SubmitField) -> Self {
		Self::Submit(field)
	}
}
