use crate::field::{FormField, Widget};

/// BoundField represents a consent form field paired with its current value
pub struct BoundField<'a> {
	field: &'a FormField,
	value: Option<&'a serde_json::Value>,
	prefix: &'a str,
}

impl<'a> BoundField<'a> {
	pub fn new(field: &'a FormField, value: Option<&'a serde_json::Value>, prefix: &'a str) -> Self {
		Self {
			field,
			value,
			prefix,
		}
	}

	pub fn name(&self) -> &str {
		self.field.name()
	}

	/// Get the HTML name attribute (with prefix)
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::{BoundField, Category, ChoiceField, FormField};
	///
	/// let field = FormField::from(ChoiceField::new(Category::new("marketing").unwrap(), false));
	///
	/// let bound = BoundField::new(&field, None, "");
	/// assert_eq!(bound.html_name(), "marketing");
	///
	/// let prefixed = BoundField::new(&field, None, "cookie_consent");
	/// assert_eq!(prefixed.html_name(), "cookie_consent-marketing");
	/// ```
	pub fn html_name(&self) -> String {
		if self.prefix.is_empty() {
			self.field.name().to_string()
		} else {
			format!("{}-{}", self.prefix, self.field.name())
		}
	}

	pub fn id_for_label(&self) -> String {
		format!("id_{}", self.html_name())
	}

	pub fn label(&self) -> Option<&str> {
		self.field.label()
	}

	pub fn value(&self) -> Option<&serde_json::Value> {
		self.value
	}

	pub fn widget(&self) -> &Widget {
		self.field.widget()
	}

	/// Whether the radio option with `choice` should render as checked
	pub fn is_checked(&self, choice: &str) -> bool {
		self.value.and_then(|v| v.as_str()) == Some(choice)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::action::SubmitAction;
	use crate::category::Category;
	use crate::field::{ChoiceField, SubmitField};

	#[test]
	fn test_bound_field_basic() {
		let field = FormField::from(ChoiceField::new(Category::new("analytics").unwrap(), true));
		let value = serde_json::json!("true");

		let bound = BoundField::new(&field, Some(&value), "");

		assert_eq!(bound.name(), "analytics");
		assert_eq!(bound.html_name(), "analytics");
		assert_eq!(bound.id_for_label(), "id_analytics");
		assert_eq!(bound.value(), Some(&value));
		assert!(bound.is_checked("true"));
		assert!(!bound.is_checked("false"));
	}

	#[test]
	fn test_bound_field_with_prefix() {
		let field = FormField::from(SubmitField::new(SubmitAction::UseAll));

		let bound = BoundField::new(&field, None, "cookie_consent");

		assert_eq!(bound.html_name(), "cookie_consent-use_all_cookies");
		assert_eq!(bound.id_for_label(), "id_cookie_consent-use_all_cookies");
		assert_eq!(bound.label(), Some("ch_cookie_consent.use_all_cookies"));
		assert!(matches!(bound.widget(), Widget::SubmitButton));
		assert!(!bound.is_checked("true"));
	}
}
