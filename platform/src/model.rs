//! Serde models for platform resources.
//!
//! The platform prefixes its own metadata keys with `$` (`$id`,
//! `$collectionId`); those are mapped onto ordinary Rust field names here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier.
    #[serde(rename = "$id")]
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Email address.
    pub email: String,

    /// Whether the email address has been verified.
    #[serde(rename = "emailVerification", default)]
    pub email_verification: bool,

    /// When the account was registered.
    #[serde(default)]
    pub registration: Option<DateTime<Utc>>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier.
    #[serde(rename = "$id")]
    pub id: String,

    /// Account the session belongs to.
    #[serde(rename = "userId")]
    pub user_id: String,

    /// Authentication method that produced the session
    /// (`email`, `magic-url`, or an OAuth provider slug).
    #[serde(default)]
    pub provider: String,

    /// When the session expires.
    #[serde(rename = "expire", default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A one-time login token receipt (magic-link flow).
///
/// The secret is delivered to the user out of band; this receipt only
/// confirms the token was minted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Token identifier.
    #[serde(rename = "$id")]
    pub id: String,

    /// Account the token was minted for.
    #[serde(rename = "userId")]
    pub user_id: String,

    /// When the token expires.
    #[serde(rename = "expire", default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A document-store collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection identifier.
    #[serde(rename = "$id")]
    pub id: String,

    /// Human-readable collection name.
    pub name: String,

    /// Permission grants in wire-token form.
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
}

/// A document in a collection.
///
/// Application payload fields are kept as loose JSON; this SDK treats the
/// document store as schema-flexible, the way the platform does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier.
    #[serde(rename = "$id")]
    pub id: String,

    /// Collection the document lives in.
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,

    /// Application payload.
    #[serde(flatten)]
    pub data: serde_json::Value,
}

/// A file stored in a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    /// File identifier.
    #[serde(rename = "$id")]
    pub id: String,

    /// Bucket the file lives in.
    #[serde(rename = "bucketId", default)]
    pub bucket_id: String,

    /// Original file name.
    #[serde(default)]
    pub name: String,

    /// Size of the uploaded payload in bytes.
    #[serde(rename = "sizeOriginal", default)]
    pub size: u64,

    /// MIME type recorded by the platform.
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
}
