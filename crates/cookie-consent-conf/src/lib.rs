//! Settings for the cookie consent form
//!
//! Settings are layered from built-in defaults, an optional TOML file and
//! `COOKIE_CONSENT_*` environment variables:
//!
//! ```toml
//! categories = ["analytics", "marketing"]
//! simplified = false
//! csrf_protection = true
//! theme = "dark"
//! position = "top"
//! ```

pub mod builder;
pub mod error;
pub mod settings;
pub mod sources;

pub use builder::SettingsBuilder;
pub use error::{SettingsError, SettingsResult, SourceError};
pub use settings::{ConsentSettings, Position, Theme};
