//! # Gatherly Platform
//!
//! Typed client surface for the backend-as-a-service platform that backs the
//! Gatherly event application: account/session management, document-store
//! collections and file-storage buckets, governed by a role-token permission
//! model.
//!
//! The crate separates the *contract* from the *transport*:
//!
//! - [`Accounts`], [`Collections`] and [`FileBuckets`] are traits describing
//!   the consumed API surface. Flow crates (`gatherly-client`,
//!   `gatherly-admin`) are generic over them.
//! - [`RestBackend`] is the production implementation over HTTPS.
//! - `gatherly-testing` provides a deterministic in-memory implementation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gatherly_platform::{PlatformConfig, RestBackend, Accounts};
//!
//! # async fn example() -> gatherly_platform::Result<()> {
//! let config = PlatformConfig::from_env()?;
//! let backend = RestBackend::new(config);
//! let session = backend.create_email_session("user@example.com", "hunter2!").await?;
//! println!("session {}", session.id);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod permission;
pub mod rest;
pub mod services;
pub mod urls;

// Re-export main types for convenience
pub use config::{AdminConfig, PlatformConfig};
pub use error::{PlatformError, Result};
pub use id::unique_id;
pub use model::{Account, Collection, Document, Session, StoredFile, Token};
pub use permission::{Permission, Role};
pub use rest::RestBackend;
pub use services::{Accounts, Collections, FileBuckets, OAuthProvider};
pub use urls::{file_view_url, oauth2_session_url};
