//! Loading language packs, config and preferences from disk.

pub mod load;
pub mod prefs;

pub use load::*;
pub use prefs::*;
pub use rafflebox_core::normalize_locale;
