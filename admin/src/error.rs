//! Error types for provisioning operations.

use gatherly_platform::PlatformError;
use thiserror::Error;

/// Errors from provisioning a per-event sub-collection.
///
/// Provisioning is a multi-step sequence (collection, then attributes, then
/// seed rows); each variant names the step that failed so callers can tell a
/// missing collection from a half-defined schema. A failure after the first
/// step leaves a partially provisioned collection behind; the error
/// documents that state rather than hiding it.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Creating the collection itself failed; nothing was provisioned.
    #[error("failed to create collection {collection_id}")]
    CreateCollection {
        /// Collection that could not be created.
        collection_id: String,
        /// Underlying platform error.
        #[source]
        source: PlatformError,
    },

    /// Defining an attribute failed; the collection exists with the
    /// attributes defined before this one.
    #[error("failed to define attribute `{key}` on {collection_id}")]
    DefineAttribute {
        /// Collection being provisioned.
        collection_id: String,
        /// Attribute key that failed.
        key: &'static str,
        /// Underlying platform error.
        #[source]
        source: PlatformError,
    },

    /// Writing a seed row failed; rows before `index` were written.
    #[error("failed to seed sponsor row {index} into {collection_id}")]
    SeedSponsor {
        /// Collection being seeded.
        collection_id: String,
        /// Zero-based index of the sponsor row that failed.
        index: usize,
        /// Underlying platform error.
        #[source]
        source: PlatformError,
    },
}

impl ProvisionError {
    /// The underlying platform error.
    #[must_use]
    pub const fn platform_error(&self) -> &PlatformError {
        match self {
            Self::CreateCollection { source, .. }
            | Self::DefineAttribute { source, .. }
            | Self::SeedSponsor { source, .. } => source,
        }
    }
}
