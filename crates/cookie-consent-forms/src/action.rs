//! Submit buttons of the consent form

use crate::error::{ConsentError, ConsentResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const BUTTON_CLASS: &str = "btn ch-cookie-consent__btn";
const SECONDARY_BUTTON_CLASS: &str = "btn ch-cookie-consent__btn ch-cookie-consent__btn--secondary";

/// The button a visitor used to submit the consent form.
///
/// `Save` keeps the per-category choices; the two shortcuts replace every
/// category with the same decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitAction {
	Save,
	#[serde(rename = "use_only_functional_cookies")]
	UseOnlyFunctional,
	#[serde(rename = "use_all_cookies")]
	UseAll,
}

impl SubmitAction {
	/// All actions in the order their buttons are rendered.
	pub const ALL: [SubmitAction; 3] = [Self::Save, Self::UseOnlyFunctional, Self::UseAll];

	/// Form field name of the button, also used as its submitted value.
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::SubmitAction;
	///
	/// assert_eq!(SubmitAction::Save.field_name(), "save");
	/// assert_eq!(SubmitAction::UseAll.field_name(), "use_all_cookies");
	/// ```
	pub fn field_name(self) -> &'static str {
		match self {
			Self::Save => "save",
			Self::UseOnlyFunctional => "use_only_functional_cookies",
			Self::UseAll => "use_all_cookies",
		}
	}

	/// Translation key of the button label.
	pub fn label(self) -> &'static str {
		match self {
			Self::Save => "ch_cookie_consent.save",
			Self::UseOnlyFunctional => "ch_cookie_consent.use_only_functional_cookies",
			Self::UseAll => "ch_cookie_consent.use_all_cookies",
		}
	}

	pub fn css_class(self) -> &'static str {
		match self {
			Self::UseAll => SECONDARY_BUTTON_CLASS,
			Self::Save | Self::UseOnlyFunctional => BUTTON_CLASS,
		}
	}

	/// Uniform decision applied to every category, or `None` for `Save`.
	pub fn shortcut_decision(self) -> Option<bool> {
		match self {
			Self::Save => None,
			Self::UseOnlyFunctional => Some(false),
			Self::UseAll => Some(true),
		}
	}

	/// Find the clicked button in submitted form data.
	///
	/// A browser only submits the button that was pressed, so exactly one
	/// button name must be present.
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::SubmitAction;
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let mut data = HashMap::new();
	/// data.insert("analytics".to_string(), json!("true"));
	/// data.insert("use_all_cookies".to_string(), json!("use_all_cookies"));
	///
	/// assert_eq!(SubmitAction::detect(&data).unwrap(), SubmitAction::UseAll);
	/// ```
	pub fn detect(data: &HashMap<String, serde_json::Value>) -> ConsentResult<Self> {
		let mut clicked = Self::ALL
			.into_iter()
			.filter(|action| data.contains_key(action.field_name()));

		match (clicked.next(), clicked.next()) {
			(Some(action), None) => Ok(action),
			(None, _) => Err(ConsentError::MalformedSubmission(
				"no submit button was clicked".to_string(),
			)),
			(Some(first), Some(second)) => Err(ConsentError::MalformedSubmission(format!(
				"more than one submit button was clicked: {} and {}",
				first, second
			))),
		}
	}
}

impl fmt::Display for SubmitAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.field_name())
	}
}

impl FromStr for SubmitAction {
	type Err = ConsentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|action| action.field_name() == s)
			.ok_or_else(|| {
				ConsentError::MalformedSubmission(format!("unrecognized submit action: {s}"))
			})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn submitted(names: &[&str]) -> HashMap<String, serde_json::Value> {
		names
			.iter()
			.map(|name| (name.to_string(), json!(name)))
			.collect()
	}

	#[rstest]
	#[case("save", SubmitAction::Save)]
	#[case("use_only_functional_cookies", SubmitAction::UseOnlyFunctional)]
	#[case("use_all_cookies", SubmitAction::UseAll)]
	fn test_parse_action(#[case] name: &str, #[case] expected: SubmitAction) {
		assert_eq!(name.parse::<SubmitAction>().unwrap(), expected);
		assert_eq!(expected.to_string(), name);
	}

	#[rstest]
	#[case("")]
	#[case("Save")]
	#[case("reject_all")]
	fn test_parse_unrecognized_action(#[case] name: &str) {
		let err = name.parse::<SubmitAction>().unwrap_err();
		assert!(matches!(err, ConsentError::MalformedSubmission(_)));
	}

	#[rstest]
	#[case(&["save"], SubmitAction::Save)]
	#[case(&["analytics", "use_only_functional_cookies"], SubmitAction::UseOnlyFunctional)]
	#[case(&["marketing", "use_all_cookies"], SubmitAction::UseAll)]
	fn test_detect_single_button(#[case] names: &[&str], #[case] expected: SubmitAction) {
		assert_eq!(SubmitAction::detect(&submitted(names)).unwrap(), expected);
	}

	#[rstest]
	#[case(&[])]
	#[case(&["analytics", "marketing"])]
	#[case(&["save", "use_all_cookies"])]
	#[case(&["save", "use_only_functional_cookies", "use_all_cookies"])]
	fn test_detect_rejects_zero_or_many_buttons(#[case] names: &[&str]) {
		let err = SubmitAction::detect(&submitted(names)).unwrap_err();
		assert!(matches!(err, ConsentError::MalformedSubmission(_)));
	}

	#[test]
	fn test_shortcut_decisions() {
		assert_eq!(SubmitAction::Save.shortcut_decision(), None);
		assert_eq!(SubmitAction::UseOnlyFunctional.shortcut_decision(), Some(false));
		assert_eq!(SubmitAction::UseAll.shortcut_decision(), Some(true));
	}

	#[test]
	fn test_only_use_all_is_secondary() {
		assert!(SubmitAction::UseAll.css_class().ends_with("--secondary"));
		assert!(!SubmitAction::Save.css_class().contains("--secondary"));
		assert!(
			!SubmitAction::UseOnlyFunctional
				.css_class()
				.contains("--secondary")
		);
	}

	#[test]
	fn test_serde_names_match_field_names() {
		for action in SubmitAction::ALL {
			assert_eq!(serde_json::to_value(action).unwrap(), json!(action.field_name()));
		}
	}
}
