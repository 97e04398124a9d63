//! Service traits for the consumed platform surface.
//!
//! These traits are **interfaces**, not implementations. Flow code
//! (`gatherly-client`, `gatherly-admin`) depends on the traits; the runtime
//! supplies [`crate::RestBackend`] and tests supply the in-memory backend
//! from `gatherly-testing`. Only the operations this application actually
//! consumes are modeled; the platform's wider API is out of scope.

use crate::error::Result;
use crate::model::{Account, Collection, Document, Session, StoredFile, Token};
use crate::permission::Permission;
use std::fmt;
use std::future::Future;

/// OAuth2 providers the application offers for hosted login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthProvider {
    /// Google Identity.
    Google,
    /// GitHub.
    Github,
}

impl OAuthProvider {
    /// Wire slug used in the hosted-redirect URL path.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Github => "github",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Account and session operations.
pub trait Accounts: Send + Sync {
    /// Create a new account with email/password credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an account with the same
    /// id or email already exists (`PlatformError::Conflict`).
    fn create_account(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> impl Future<Output = Result<Account>> + Send;

    /// Create a session from email/password credentials.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Unauthorized` on bad credentials, or a
    /// transport error.
    fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session>> + Send;

    /// Mint a magic-link login token.
    ///
    /// The platform emails the link; the returned [`Token`] is only a
    /// receipt. `redirect_url` is where the link lands after verification.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn create_magic_url_token(
        &self,
        user_id: &str,
        email: &str,
        redirect_url: &str,
    ) -> impl Future<Output = Result<Token>> + Send;

    /// Build the hosted OAuth2 login URL for `provider`.
    ///
    /// No network call is made; the caller redirects the browser to the
    /// returned URL and the platform drives the provider handshake,
    /// landing on `success_url` or `failure_url`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend has no endpoint configured.
    fn oauth2_session_url(
        &self,
        provider: OAuthProvider,
        success_url: &str,
        failure_url: &str,
    ) -> Result<String>;

    /// Fetch the account behind the current credentials.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Unauthorized` when no session is active.
    fn get_account(&self) -> impl Future<Output = Result<Account>> + Send;

    /// Delete a session (sign out).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is unknown.
    fn delete_session(&self, session_id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Document-store operations.
pub trait Collections: Send + Sync {
    /// Create a collection with the given permission grants.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Conflict` if the id is taken, or a
    /// transport error. Requires a server API key.
    fn create_collection(
        &self,
        collection_id: &str,
        name: &str,
        permissions: &[Permission],
    ) -> impl Future<Output = Result<Collection>> + Send;

    /// Define a string attribute on a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. Requires a server API key.
    fn create_string_attribute(
        &self,
        collection_id: &str,
        key: &str,
        size: u32,
        required: bool,
        default: Option<&str>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Create a document in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the id is taken, or the
    /// caller lacks a create grant on the collection.
    fn create_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: serde_json::Value,
    ) -> impl Future<Output = Result<Document>> + Send;

    /// Delete a document.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` for unknown documents, or a
    /// transport error.
    fn delete_document(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// File-storage bucket operations.
pub trait FileBuckets: Send + Sync {
    /// Upload a file into a bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the file id is taken.
    fn create_file(
        &self,
        bucket_id: &str,
        file_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<StoredFile>> + Send;

    /// Delete a file from a bucket.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` for unknown files, or a
    /// transport error.
    fn delete_file(
        &self,
        bucket_id: &str,
        file_id: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::OAuthProvider;

    #[test]
    fn test_provider_slugs() {
        assert_eq!(OAuthProvider::Google.slug(), "google");
        assert_eq!(OAuthProvider::Github.slug(), "github");
        assert_eq!(OAuthProvider::Github.to_string(), "github");
    }
}
