//! Bookmarks Module
//!
//! The single resource served by this crate: saved links with a title, a free-text
//! description and a 1-5 rating.
//!
//! # Request flow
//!
//! - write paths run the [`validation`] rules before anything reaches the store
//! - the store ([`Bookmarks`]) keeps exactly what the author sent
//! - read paths pass every record through [`sanitize`] on the way out
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks::bookmarks;
//!
//! let app = Router::new()
//!     .nest("/bookmarks", bookmarks::routes())
//!     .with_state(app_state);
//!
//! let store = bookmarks::Bookmarks::new(connection);
//! let all = store.list_all().await?;
//! ```

mod handler;
mod lib;
mod routes;
pub mod sanitize;
pub mod validation;

pub use lib::*;
pub use routes::routes;

/// Returns the migrations for the bookmarks table.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[(
        "bookmarks_001_schema.sql",
        include_str!("migrations/001_schema.sql"),
    )]
}
