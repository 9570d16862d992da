//! Errors raised while building or resolving a consent form

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsentError {
	#[error("Malformed submission: {0}")]
	MalformedSubmission(String),
	#[error("Invalid category name: {0:?}")]
	InvalidCategory(String),
	#[error("Duplicate category: {0}")]
	DuplicateCategory(String),
}

pub type ConsentResult<T> = Result<T, ConsentError>;

impl ConsentError {
	/// Returns `true` when the error should be surfaced as a client error.
	///
	/// # Examples
	///
	/// ```
	/// use cookie_consent_forms::ConsentError;
	///
	/// let err = ConsentError::MalformedSubmission("missing field".to_string());
	/// assert!(err.is_client_error());
	///
	/// let err = ConsentError::DuplicateCategory("analytics".to_string());
	/// assert!(!err.is_client_error());
	/// ```
	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::MalformedSubmission(_))
	}
}
