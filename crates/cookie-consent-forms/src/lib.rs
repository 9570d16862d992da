//! Cookie consent form building and submission handling
//!
//! This crate provides the form behind a cookie consent banner:
//! - One allow/deny choice per cookie category, pre-filled from the
//!   visitor's current consent
//! - Save, functional-only and accept-all submit buttons
//! - Resolution of a submission into a complete [`ConsentState`]
//!
//! Reading and writing consent cookies, translating label keys and CSRF
//! token checks belong to the surrounding application.
//!
//! ```
//! use cookie_consent_forms::{Category, ConsentFormBuilder, SubmitAction};
//! use std::collections::HashMap;
//! use serde_json::json;
//!
//! let categories = vec![
//!     Category::new("analytics").unwrap(),
//!     Category::new("marketing").unwrap(),
//! ];
//! let builder = ConsentFormBuilder::new(categories, |c: &Category| c.as_str() == "analytics")
//!     .unwrap();
//!
//! let form = builder.build();
//! assert_eq!(form.initial().get("analytics"), Some(&json!("true")));
//! assert_eq!(form.initial().get("marketing"), Some(&json!("false")));
//!
//! let state = builder
//!     .resolve_submission(&HashMap::new(), SubmitAction::UseAll)
//!     .unwrap();
//! assert!(state.all_allowed());
//! ```

pub mod action;
pub mod bound_field;
pub mod category;
pub mod checker;
pub mod error;
pub mod field;
pub mod form;
pub mod state;

pub use action::SubmitAction;
pub use bound_field::BoundField;
pub use category::{Category, default_categories, parse_categories};
pub use checker::{ConsentChecker, NoConsent};
pub use error::{ConsentError, ConsentResult};
pub use field::{ChoiceField, FieldChoice, FormField, SubmitField, Widget};
pub use form::{ConsentForm, ConsentFormBuilder, FormOptions};
pub use state::ConsentState;
