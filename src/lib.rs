//! # MediaShelf Backend Library
//!
//! MediaShelf exposes a local directory tree as a browsable, searchable media
//! library over HTTP. Each immediate subdirectory of the storage root is a
//! *category*; the files inside it are listed with size, extension and a
//! coarse type (`image`, `video`, `other`), and can be streamed inline or
//! downloaded.
//!
//! There is no index and no cache: every request re-reads the filesystem.
//!
//! ## Core Components
//!
//! - [`library`]: scanning, search and file resolution over the storage root
//! - [`routes`]: HTTP API endpoint handlers
//! - [`error`]: mapping of failures to HTTP status codes and JSON bodies
//! - [`config`]: layered configuration (defaults, file, environment)
//! - [`middleware`]: security headers
//! - [`metrics`]: request counters
//! - [`state`]: shared application state
//! - [`types`]: serializable view objects

pub mod config;
pub mod error;
pub mod library;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
