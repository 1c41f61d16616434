//! Request and response bodies carried in the envelope's `data` field.

pub mod auth;
pub mod marker;
pub mod saves;
pub mod server;

pub use auth::*;
pub use marker::{Acknowledged, NoData};
pub use saves::*;
pub use server::*;

use std::collections::BTreeMap;

/// Opaque string-to-string settings map (server options, advanced game
/// settings). Keys and values are passed through untouched.
pub type SettingsMap = BTreeMap<String, String>;
