//! # lingua-pages
//!
//! Tera-based template engine that renders the site pages of a translation
//! dashboard from catalog data.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lingua_core::types::{Permissions, Project};
//! use lingua_pages::{PageContext, PageEngine, PageKind};
//!
//! fn render_project(project: &Project) {
//!     if let Ok(engine) = PageEngine::new(None, None) {
//!         let ctx = PageContext::project("Lingua", project, &Permissions::none());
//!         let kind = PageKind::Project { slug: project.slug.clone() };
//!         if let Ok(html) = engine.render(&kind, &ctx) {
//!             println!("{} bytes", html.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod i18n;

pub use context::PageContext;
pub use engine::{PageEngine, PageKind};
pub use error::PageError;
pub use i18n::MessageCatalog;
