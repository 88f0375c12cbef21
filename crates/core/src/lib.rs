//! Domain types shared by the red-team test backend.
//!
//! Zero internal dependencies: submissions and their validation, result
//! payloads, status notifications, and the static catalogs exposed to
//! clients.

pub mod catalog;
pub mod error;
pub mod results;
pub mod status;
pub mod submission;
pub mod types;
