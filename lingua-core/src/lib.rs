//! Lingua core library — domain types, catalog persistence, routes, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes, unit counters, domain structs
//! - [`error`] — [`CatalogError`]
//! - [`catalog`] — load / save / init / list
//! - [`routes`] — named-route URL reversal

pub mod catalog;
pub mod error;
pub mod routes;
pub mod types;

pub use error::CatalogError;
pub use routes::Route;
pub use types::{
    Change, GlossaryEntry, GlossaryRef, LanguageCode, Permissions, Project, ProjectSlug,
    Subproject, SubprojectSlug, UnitCounts,
};
