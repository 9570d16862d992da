//! Consent form construction and submission resolution

use crate::action::SubmitAction;
use crate::bound_field::BoundField;
use crate::category::Category;
use crate::checker::ConsentChecker;
use crate::error::{ConsentError, ConsentResult};
use crate::field::{CHOICE_FALSE, CHOICE_TRUE, ChoiceField, FormField, SubmitField};
use crate::state::ConsentState;
use std::collections::HashMap;
use std::fmt;

/// Translation domain of every label key emitted by the form.
pub const TRANSLATION_DOMAIN: &str = "CHCookieConsentBundle";

/// Field name prefix of the rendered form.
pub const FORM_PREFIX: &str = "cookie_consent";

/// Options forwarded to the rendering and form-protection layers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
	pub translation_domain: String,
	pub csrf_protection: bool,
}

impl Default for FormOptions {
	fn default() -> Self {
		Self {
			translation_domain: TRANSLATION_DOMAIN.to_string(),
			csrf_protection: true,
		}
	}
}

/// Builds the cookie consent form and resolves its submissions.
///
/// The checker is consulted once per category when fields are built, to
/// pre-select the visitor's current decision.
pub struct ConsentFormBuilder<C> {
	categories: Vec<Category>,
	checker: C,
	simplified: bool,
	csrf_protection: bool,
	prefix: String,
}

impl<C: ConsentChecker> ConsentFormBuilder<C> {
	/// Create a builder for the given categories
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::{Category, ConsentFormBuilder, NoConsent};
	///
	/// let categories = vec![Category::new("analytics").unwrap()];
	/// let builder = ConsentFormBuilder::new(categories, NoConsent).unwrap();
	/// assert!(!builder.is_simplified());
	/// assert!(builder.csrf_protection());
	///
	/// let duplicated = vec![
	///     Category::new("analytics").unwrap(),
	///     Category::new("analytics").unwrap(),
	/// ];
	/// assert!(ConsentFormBuilder::new(duplicated, NoConsent).is_err());
	/// ```
	pub fn new(categories: Vec<Category>, checker: C) -> ConsentResult<Self> {
		for (index, category) in categories.iter().enumerate() {
			if categories[..index].contains(category) {
				return Err(ConsentError::DuplicateCategory(category.to_string()));
			}
		}
		Ok(Self {
			categories,
			checker,
			simplified: false,
			csrf_protection: true,
			prefix: FORM_PREFIX.to_string(),
		})
	}

	/// Render the compact variant of the consent banner
	pub fn simplified(mut self, simplified: bool) -> Self {
		self.simplified = simplified;
		self
	}

	pub fn with_csrf_protection(mut self, enabled: bool) -> Self {
		self.csrf_protection = enabled;
		self
	}

	/// Field name prefix of the built form; an empty prefix renders bare names
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	pub fn categories(&self) -> &[Category] {
		&self.categories
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn is_simplified(&self) -> bool {
		self.simplified
	}

	pub fn csrf_protection(&self) -> bool {
		self.csrf_protection
	}

	pub fn options(&self) -> FormOptions {
		FormOptions {
			csrf_protection: self.csrf_protection,
			..FormOptions::default()
		}
	}

	/// Build one choice field per category, in category order, followed by
	/// the save, functional-only and accept-all buttons
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::{Category, ConsentFormBuilder};
	///
	/// let categories = vec![
	///     Category::new("analytics").unwrap(),
	///     Category::new("marketing").unwrap(),
	/// ];
	/// let builder = ConsentFormBuilder::new(categories, |c: &Category| c.as_str() == "analytics")
	///     .unwrap();
	///
	/// let fields = builder.build_fields();
	/// let names: Vec<&str> = fields.iter().map(|f| f.name()).collect();
	/// assert_eq!(
	///     names,
	///     vec!["analytics", "marketing", "save", "use_only_functional_cookies", "use_all_cookies"]
	/// );
	/// assert_eq!(fields[0].initial(), Some("true"));
	/// assert_eq!(fields[1].initial(), Some("false"));
	/// ```
	pub fn build_fields(&self) -> Vec<FormField> {
		tracing::debug!(
			categories = self.categories.len(),
			simplified = self.simplified,
			csrf_protection = self.csrf_protection,
			"building cookie consent form"
		);

		let choices = self.categories.iter().map(|category| {
			let allowed = self.checker.is_category_allowed(category);
			FormField::from(ChoiceField::new(category.clone(), allowed))
		});
		let buttons = SubmitAction::ALL
			.into_iter()
			.map(|action| FormField::from(SubmitField::new(action)));

		choices.chain(buttons).collect()
	}

	/// Build the complete form: fields, initial values and options
	pub fn build(&self) -> ConsentForm {
		let fields = self.build_fields();
		let initial = fields
			.iter()
			.filter_map(|field| {
				field
					.initial()
					.map(|value| (field.name().to_string(), serde_json::json!(value)))
			})
			.collect();

		ConsentForm {
			fields,
			initial,
			data: HashMap::new(),
			is_bound: false,
			options: self.options(),
			simplified: self.simplified,
			prefix: self.prefix.clone(),
		}
	}

	/// Resolve the final decision per category for a submission.
	///
	/// `Save` takes each category's submitted choice; the shortcut actions
	/// discard the submitted choices and apply one decision to every
	/// category. Values submitted for unknown names are ignored.
	///
	/// # Errors
	///
	/// [`ConsentError::MalformedSubmission`] when saving and a category is
	/// missing or carries a value other than `"true"`/`"false"`.
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::{Category, ConsentFormBuilder, NoConsent, SubmitAction};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let categories = vec![
	///     Category::new("analytics").unwrap(),
	///     Category::new("marketing").unwrap(),
	/// ];
	/// let builder = ConsentFormBuilder::new(categories, NoConsent).unwrap();
	///
	/// let mut data = HashMap::new();
	/// data.insert("analytics".to_string(), json!("false"));
	/// data.insert("marketing".to_string(), json!("true"));
	///
	/// let saved = builder.resolve_submission(&data, SubmitAction::Save).unwrap();
	/// assert_eq!(saved.get_by_name("analytics"), Some(false));
	/// assert_eq!(saved.get_by_name("marketing"), Some(true));
	///
	/// let all = builder.resolve_submission(&data, SubmitAction::UseAll).unwrap();
	/// assert!(all.all_allowed());
	/// ```
	pub fn resolve_submission(
		&self,
		data: &HashMap<String, serde_json::Value>,
		action: SubmitAction,
	) -> ConsentResult<ConsentState> {
		let state = match action.shortcut_decision() {
			Some(allowed) => ConsentState::uniform(&self.categories, allowed),
			None => self
				.categories
				.iter()
				.map(|category| {
					submitted_choice(data, category).map(|allowed| (category.clone(), allowed))
				})
				.collect::<ConsentResult<ConsentState>>()
				.inspect_err(|e| {
					tracing::warn!(%action, error = %e, "rejected consent submission");
				})?,
		};

		tracing::debug!(
			%action,
			allowed = state.allowed_categories().count(),
			"resolved consent submission"
		);
		Ok(state)
	}

	/// Detect the clicked button in the submitted data and resolve the
	/// submission with it.
	///
	/// Keys may carry the form prefix as rendered by
	/// [`BoundField::html_name`] (`cookie_consent-analytics`) or be bare
	/// field names; a prefixed key wins over a bare one.
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::{Category, ConsentFormBuilder, NoConsent};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let categories = vec![Category::new("analytics").unwrap()];
	/// let builder = ConsentFormBuilder::new(categories, NoConsent).unwrap();
	///
	/// let mut data = HashMap::new();
	/// data.insert("analytics".to_string(), json!("true"));
	/// data.insert("use_only_functional_cookies".to_string(), json!(""));
	///
	/// let state = builder.resolve_request(&data).unwrap();
	/// assert_eq!(state.get_by_name("analytics"), Some(false));
	/// ```
	pub fn resolve_request(
		&self,
		data: &HashMap<String, serde_json::Value>,
	) -> ConsentResult<ConsentState> {
		let data = self.strip_prefix(data);
		let action = SubmitAction::detect(&data)
			.inspect_err(|e| tracing::warn!(error = %e, "rejected consent submission"))?;
		self.resolve_submission(&data, action)
	}

	fn strip_prefix(
		&self,
		data: &HashMap<String, serde_json::Value>,
	) -> HashMap<String, serde_json::Value> {
		if self.prefix.is_empty() {
			return data.clone();
		}
		let field_prefix = format!("{}-", self.prefix);
		let (prefixed, bare): (Vec<_>, Vec<_>) = data
			.iter()
			.partition(|(key, _)| key.starts_with(&field_prefix));

		bare.into_iter()
			.map(|(key, value)| (key.clone(), value.clone()))
			.chain(prefixed.into_iter().map(|(key, value)| {
				(key[field_prefix.len()..].to_string(), value.clone())
			}))
			.collect()
	}
}

impl<C> fmt::Debug for ConsentFormBuilder<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConsentFormBuilder")
			.field("categories", &self.categories)
			.field("simplified", &self.simplified)
			.field("csrf_protection", &self.csrf_protection)
			.field("prefix", &self.prefix)
			.finish_non_exhaustive()
	}
}

/// Reads one category's choice from submitted data.
///
/// Browsers submit radio values as strings; JSON clients may send booleans.
fn submitted_choice(
	data: &HashMap<String, serde_json::Value>,
	category: &Category,
) -> ConsentResult<bool> {
	match data.get(category.as_str()) {
		Some(serde_json::Value::String(value)) if value == CHOICE_TRUE => Ok(true),
		Some(serde_json::Value::String(value)) if value == CHOICE_FALSE => Ok(false),
		Some(serde_json::Value::Bool(value)) => Ok(*value),
		Some(other) => Err(ConsentError::MalformedSubmission(format!(
			"invalid choice for {}: {}",
			category, other
		))),
		None => Err(ConsentError::MalformedSubmission(format!(
			"missing choice for {}",
			category
		))),
	}
}

/// A built consent form, ready to be rendered
#[derive(Debug, Clone)]
pub struct ConsentForm {
	fields: Vec<FormField>,
	initial: HashMap<String, serde_json::Value>,
	data: HashMap<String, serde_json::Value>,
	is_bound: bool,
	options: FormOptions,
	simplified: bool,
	prefix: String,
}

impl ConsentForm {
	pub fn fields(&self) -> &[FormField] {
		&self.fields
	}

	/// Category choice fields, without the buttons
	pub fn choice_fields(&self) -> impl Iterator<Item = &ChoiceField> {
		self.fields.iter().filter_map(FormField::as_choice)
	}

	pub fn submit_fields(&self) -> impl Iterator<Item = &SubmitField> {
		self.fields.iter().filter_map(FormField::as_submit)
	}

	pub fn get_field(&self, name: &str) -> Option<&FormField> {
		self.fields.iter().find(|f| f.name() == name)
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	pub fn initial(&self) -> &HashMap<String, serde_json::Value> {
		&self.initial
	}

	pub fn options(&self) -> &FormOptions {
		&self.options
	}

	pub fn is_simplified(&self) -> bool {
		self.simplified
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn set_prefix(&mut self, prefix: String) {
		self.prefix = prefix;
	}

	/// Attach submitted data so bound fields show it instead of the initial
	/// values, e.g. when re-rendering after a rejected submission
	pub fn bind(&mut self, data: HashMap<String, serde_json::Value>) {
		self.data = data;
		self.is_bound = true;
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::{Category, ConsentFormBuilder, NoConsent};
	///
	/// let categories = vec![Category::new("analytics").unwrap()];
	/// let form = ConsentFormBuilder::new(categories, NoConsent).unwrap().build();
	///
	/// let bound = form.get_bound_field("analytics").unwrap();
	/// assert_eq!(bound.html_name(), "cookie_consent-analytics");
	/// assert_eq!(bound.value(), Some(&serde_json::json!("false")));
	/// ```
	pub fn get_bound_field(&self, name: &str) -> Option<BoundField<'_>> {
		let field = self.get_field(name)?;
		let value = self.data.get(name).or_else(|| self.initial.get(name));
		Some(BoundField::new(field, value, &self.prefix))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::checker::NoConsent;
	use serde_json::json;

	fn categories(names: &[&str]) -> Vec<Category> {
		names.iter().map(|name| Category::new(*name).unwrap()).collect()
	}

	fn data(pairs: &[(&str, serde_json::Value)]) -> HashMap<String, serde_json::Value> {
		pairs
			.iter()
			.map(|(key, value)| (key.to_string(), value.clone()))
			.collect()
	}

	#[test]
	fn test_build_fields_order_and_defaults() {
		let builder = ConsentFormBuilder::new(
			categories(&["tracking", "analytics", "social_media"]),
			|c: &Category| c.as_str() != "analytics",
		)
		.unwrap();

		let fields = builder.build_fields();
		assert_eq!(fields.len(), 6);

		let defaults: Vec<(&str, Option<&str>)> =
			fields.iter().map(|f| (f.name(), f.initial())).collect();
		assert_eq!(
			defaults,
			vec![
				("tracking", Some("true")),
				("analytics", Some("false")),
				("social_media", Some("true")),
				("save", None),
				("use_only_functional_cookies", None),
				("use_all_cookies", None),
			]
		);
	}

	#[test]
	fn test_build_fields_without_categories() {
		let builder = ConsentFormBuilder::new(vec![], NoConsent).unwrap();
		let fields = builder.build_fields();

		assert_eq!(fields.len(), 3);
		assert!(fields.iter().all(|f| f.as_submit().is_some()));
	}

	#[test]
	fn test_duplicate_category_rejected() {
		let result = ConsentFormBuilder::new(categories(&["analytics", "marketing", "analytics"]), NoConsent);
		assert!(matches!(result, Err(ConsentError::DuplicateCategory(name)) if name == "analytics"));
	}

	#[test]
	fn test_options_follow_builder() {
		let builder = ConsentFormBuilder::new(categories(&["analytics"]), NoConsent)
			.unwrap()
			.simplified(true)
			.with_csrf_protection(false);

		let form = builder.build();
		assert!(form.is_simplified());
		assert_eq!(
			form.options(),
			&FormOptions {
				translation_domain: "CHCookieConsentBundle".to_string(),
				csrf_protection: false,
			}
		);
	}

	#[test]
	fn test_save_ignores_unknown_names() {
		let builder = ConsentFormBuilder::new(categories(&["analytics"]), NoConsent).unwrap();
		let submitted = data(&[
			("analytics", json!("true")),
			("unknown", json!("false")),
			("_token", json!("abc")),
		]);

		let state = builder
			.resolve_submission(&submitted, SubmitAction::Save)
			.unwrap();
		assert_eq!(state.len(), 1);
		assert_eq!(state.get_by_name("analytics"), Some(true));
	}

	#[test]
	fn test_save_accepts_json_booleans() {
		let builder = ConsentFormBuilder::new(categories(&["analytics", "marketing"]), NoConsent).unwrap();
		let submitted = data(&[("analytics", json!(true)), ("marketing", json!(false))]);

		let state = builder
			.resolve_submission(&submitted, SubmitAction::Save)
			.unwrap();
		assert_eq!(state.get_by_name("analytics"), Some(true));
		assert_eq!(state.get_by_name("marketing"), Some(false));
	}

	#[test]
	fn test_save_rejects_invalid_choice() {
		let builder = ConsentFormBuilder::new(categories(&["analytics"]), NoConsent).unwrap();
		for value in [json!("yes"), json!(1), json!(null), json!("TRUE")] {
			let submitted = data(&[("analytics", value)]);
			let err = builder
				.resolve_submission(&submitted, SubmitAction::Save)
				.unwrap_err();
			assert!(matches!(err, ConsentError::MalformedSubmission(_)));
		}
	}

	#[test]
	fn test_shortcuts_ignore_malformed_choices() {
		let builder = ConsentFormBuilder::new(categories(&["analytics", "marketing"]), NoConsent).unwrap();
		let submitted = data(&[("analytics", json!("garbage"))]);

		let functional = builder
			.resolve_submission(&submitted, SubmitAction::UseOnlyFunctional)
			.unwrap();
		assert!(functional.none_allowed());
		assert_eq!(functional.len(), 2);
	}

	#[test]
	fn test_resolve_request_requires_one_button() {
		let builder = ConsentFormBuilder::new(categories(&["analytics"]), NoConsent).unwrap();

		let no_button = data(&[("analytics", json!("true"))]);
		assert!(builder.resolve_request(&no_button).is_err());

		let saved = data(&[("analytics", json!("true")), ("save", json!("save"))]);
		let state = builder.resolve_request(&saved).unwrap();
		assert_eq!(state.get_by_name("analytics"), Some(true));
	}

	#[test]
	fn test_bind_empty_data_marks_bound() {
		let mut form = ConsentFormBuilder::new(categories(&["analytics"]), NoConsent)
			.unwrap()
			.build();

		form.bind(HashMap::new());
		assert!(form.is_bound());

		let bound = form.get_bound_field("analytics").unwrap();
		assert_eq!(bound.value(), Some(&json!("false")));
	}

	#[test]
	fn test_resolve_request_accepts_rendered_names() {
		let builder =
			ConsentFormBuilder::new(categories(&["analytics", "marketing"]), NoConsent).unwrap();
		let form = builder.build();

		let name = |field: &str| form.get_bound_field(field).unwrap().html_name();
		let posted = data(&[
			(name("analytics").as_str(), json!("true")),
			(name("marketing").as_str(), json!("false")),
			(name("save").as_str(), json!("save")),
		]);
		assert!(posted.contains_key("cookie_consent-save"));

		let state = builder.resolve_request(&posted).unwrap();
		assert_eq!(state.get_by_name("analytics"), Some(true));
		assert_eq!(state.get_by_name("marketing"), Some(false));
	}

	#[test]
	fn test_prefixed_key_wins_over_bare_key() {
		let builder = ConsentFormBuilder::new(categories(&["analytics"]), NoConsent).unwrap();
		let posted = data(&[
			("analytics", json!("false")),
			("cookie_consent-analytics", json!("true")),
			("cookie_consent-save", json!("save")),
		]);

		let state = builder.resolve_request(&posted).unwrap();
		assert_eq!(state.get_by_name("analytics"), Some(true));
	}

	#[test]
	fn test_custom_prefix() {
		let builder = ConsentFormBuilder::new(categories(&["analytics"]), NoConsent)
			.unwrap()
			.with_prefix("consent");
		let form = builder.build();
		assert_eq!(form.prefix(), "consent");
		assert_eq!(
			form.get_bound_field("use_all_cookies").unwrap().html_name(),
			"consent-use_all_cookies"
		);

		let posted = data(&[("consent-use_all_cookies", json!("use_all_cookies"))]);
		assert!(builder.resolve_request(&posted).unwrap().all_allowed());

		let unprefixed = ConsentFormBuilder::new(categories(&["analytics"]), NoConsent)
			.unwrap()
			.with_prefix("");
		let form = unprefixed.build();
		assert_eq!(form.get_bound_field("analytics").unwrap().html_name(), "analytics");
	}

	#[test]
	fn test_bound_field_prefers_submitted_data() {
		let builder = ConsentFormBuilder::new(categories(&["analytics"]), NoConsent).unwrap();
		let mut form = builder.build();
		assert!(!form.is_bound());

		form.bind(data(&[("analytics", json!("true"))]));
		assert!(form.is_bound());

		let bound = form.get_bound_field("analytics").unwrap();
		assert_eq!(bound.value(), Some(&json!("true")));
		assert!(form.get_bound_field("marketing").is_none());
	}

	#[test]
	fn test_previous_state_prefills_form() {
		let previous: ConsentState = categories(&["analytics", "marketing"])
			.into_iter()
			.zip([false, true])
			.collect();
		let builder =
			ConsentFormBuilder::new(categories(&["analytics", "marketing", "tracking"]), previous)
				.unwrap();

		let form = builder.build();
		assert_eq!(form.initial().get("analytics"), Some(&json!("false")));
		assert_eq!(form.initial().get("marketing"), Some(&json!("true")));
		assert_eq!(form.initial().get("tracking"), Some(&json!("false")));
		assert_eq!(form.initial().get("save"), None);
	}
}
