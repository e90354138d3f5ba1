//! Ticket draw logic. Keep this crate free of IO and platform concerns.

pub mod config;
pub mod draw;
pub mod error;
pub mod events;
pub mod locale;
pub mod options;
pub mod prefs;
pub mod render;
pub mod rng;
pub mod session;
pub mod store;

pub use config::*;
pub use draw::*;
pub use error::*;
pub use events::*;
pub use locale::*;
pub use options::*;
pub use prefs::*;
pub use render::*;
pub use rng::*;
pub use session::*;
pub use store::*;
