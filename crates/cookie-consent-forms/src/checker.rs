//! Lookup of the consent a user has already given

use crate::category::Category;

/// Answers whether a category is currently allowed by the user.
///
/// Implemented for closures, so a cookie reader or session lookup can be
/// plugged in without a wrapper type.
///
/// # Examples
///
/// ```
/// use cookie_consent_forms::{Category, ConsentChecker};
///
/// let checker = |category: &Category| category.as_str() == "analytics";
///
/// assert!(checker.is_category_allowed(&Category::new("analytics").unwrap()));
/// assert!(!checker.is_category_allowed(&Category::new("marketing").unwrap()));
/// ```
pub trait ConsentChecker {
	fn is_category_allowed(&self, category: &Category) -> bool;
}

impl<F> ConsentChecker for F
where
	F: Fn(&Category) -> bool,
{
	fn is_category_allowed(&self, category: &Category) -> bool {
		self(category)
	}
}

/// Checker for a visitor that has not given consent yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConsent;

impl ConsentChecker for NoConsent {
	fn is_category_allowed(&self, _category: &Category) -> bool {
		false
	}
}
