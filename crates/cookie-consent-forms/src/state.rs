//! Resolved consent decisions

use crate::category::Category;
use crate::checker::ConsentChecker;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Allow/deny decision for every known category, in category order.
///
/// A state is built in one step from a submission and handed to the
/// persistence layer as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsentState {
	decisions: IndexMap<Category, bool>,
}

impl ConsentState {
	/// Same decision for each category
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::{Category, ConsentState};
	///
	/// let categories = vec![
	///     Category::new("analytics").unwrap(),
	///     Category::new("marketing").unwrap(),
	/// ];
	/// let state = ConsentState::uniform(&categories, true);
	/// assert!(state.all_allowed());
	/// assert_eq!(state.len(), 2);
	/// ```
	pub fn uniform(categories: &[Category], allowed: bool) -> Self {
		categories
			.iter()
			.map(|category| (category.clone(), allowed))
			.collect()
	}

	/// Decision for a category, `None` when the category is unknown
	pub fn get(&self, category: &Category) -> Option<bool> {
		self.decisions.get(category).copied()
	}

	/// Lookup by plain name
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::{Category, ConsentState};
	///
	/// let state: ConsentState = [(Category::new("tracking").unwrap(), false)]
	///     .into_iter()
	///     .collect();
	/// assert_eq!(state.get_by_name("tracking"), Some(false));
	/// assert_eq!(state.get_by_name("marketing"), None);
	/// ```
	pub fn get_by_name(&self, name: &str) -> Option<bool> {
		self.decisions
			.iter()
			.find(|(category, _)| category.as_str() == name)
			.map(|(_, allowed)| *allowed)
	}

	pub fn is_allowed(&self, category: &Category) -> bool {
		self.get(category).unwrap_or(false)
	}

	pub fn len(&self) -> usize {
		self.decisions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.decisions.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Category, bool)> {
		self.decisions
			.iter()
			.map(|(category, allowed)| (category, *allowed))
	}

	pub fn categories(&self) -> impl Iterator<Item = &Category> {
		self.decisions.keys()
	}

	pub fn allowed_categories(&self) -> impl Iterator<Item = &Category> {
		self.iter()
			.filter(|(_, allowed)| *allowed)
			.map(|(category, _)| category)
	}

	pub fn all_allowed(&self) -> bool {
		self.decisions.values().all(|allowed| *allowed)
	}

	pub fn none_allowed(&self) -> bool {
		!self.decisions.values().any(|allowed| *allowed)
	}
}

impl FromIterator<(Category, bool)> for ConsentState {
	fn from_iter<T: IntoIterator<Item = (Category, bool)>>(iter: T) -> Self {
		Self {
			decisions: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for ConsentState {
	type Item = (Category, bool);
	type IntoIter = indexmap::map::IntoIter<Category, bool>;

	fn into_iter(self) -> Self::IntoIter {
		self.decisions.into_iter()
	}
}

/// A previously resolved state pre-fills the next form.
impl ConsentChecker for ConsentState {
	fn is_category_allowed(&self, category: &Category) -> bool {
		self.is_allowed(category)
	}
}
