//! Session state types.

use chrono::{DateTime, Utc};
use gatherly_platform::Account;
use serde::{Deserialize, Serialize};

/// Snapshot of the authenticated identity.
///
/// Held in memory on the [`crate::ClientSession`] as the single source of
/// truth, and mirrored into the persisted profile store so a reloaded
/// application can attribute writes without refetching. Invalidated
/// explicitly on sign-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account identifier; stored as the creator on event documents.
    pub user_id: String,

    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Whether the email address has been verified.
    pub email_verified: bool,

    /// When this snapshot was taken.
    pub fetched_at: DateTime<Utc>,
}

impl CurrentUser {
    /// Snapshot an account record as of now.
    #[must_use]
    pub fn from_account(account: &Account) -> Self {
        Self {
            user_id: account.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            email_verified: account.email_verification,
            fetched_at: Utc::now(),
        }
    }
}
