//! Presentation helpers for calculation results.
//!
//! Message tables are loaded per locale by
//! [`ConfigLoader`](crate::config::ConfigLoader). The caller's locale is
//! passed in explicitly on every render; none of it influences the
//! calculation itself.

mod locale;
mod messages;
mod summary;

pub use locale::{Locale, LocalePreference};
pub use messages::MessageCatalog;
pub use summary::render_summary;
