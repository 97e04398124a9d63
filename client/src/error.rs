//! Error types for client session operations.

use gatherly_admin::ProvisionError;
use gatherly_platform::PlatformError;
use std::fmt;
use thiserror::Error;

/// Result type alias for client session operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from session-level operations (auth, user state).
#[derive(Debug, Error)]
pub enum ClientError {
    /// No authenticated user is present in session state.
    #[error("no authenticated user in session state")]
    NotAuthenticated,

    /// The backing platform rejected or failed the call.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The persisted profile mirror could not be read or written.
    #[error("profile store error: {0}")]
    ProfileStore(String),
}

/// The step of the event-creation workflow that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStep {
    /// Uploading the banner asset.
    UploadBanner,
    /// Writing the event document.
    WriteDocument,
    /// Provisioning the registration sub-collection.
    ProvisionRegistrations,
    /// Provisioning and seeding the sponsor sub-collection.
    ProvisionSponsors,
}

impl fmt::Display for EventStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UploadBanner => "upload-banner",
            Self::WriteDocument => "write-document",
            Self::ProvisionRegistrations => "provision-registrations",
            Self::ProvisionSponsors => "provision-sponsors",
        };
        f.write_str(name)
    }
}

/// Cause of a failed event-creation step.
#[derive(Debug, Error)]
pub enum EventStepError {
    /// A direct platform call failed (upload, document write).
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A provisioning sequence failed (collection, attribute, or seed row).
    #[error(transparent)]
    Provision(#[from] ProvisionError),
}

/// What happened to a resource committed before the failing step.
///
/// Compensations run best-effort in reverse commit order; an outcome is
/// recorded for each so callers can distinguish a clean unwind from an
/// orphaned resource that needs manual cleanup.
#[derive(Debug)]
pub enum CompensationOutcome {
    /// The uploaded banner was deleted.
    BannerDeleted {
        /// File that was removed.
        file_id: String,
    },
    /// The event document was deleted.
    DocumentDeleted {
        /// Document that was removed.
        document_id: String,
    },
    /// Deleting the banner failed; the file is orphaned in the bucket.
    BannerOrphaned {
        /// File left behind.
        file_id: String,
        /// Why the deletion failed.
        source: PlatformError,
    },
    /// Deleting the document failed; the record is orphaned in the store.
    DocumentOrphaned {
        /// Document left behind.
        document_id: String,
        /// Why the deletion failed.
        source: PlatformError,
    },
}

impl CompensationOutcome {
    /// Returns `true` if this outcome left a resource behind.
    #[must_use]
    pub const fn is_orphan(&self) -> bool {
        matches!(
            self,
            Self::BannerOrphaned { .. } | Self::DocumentOrphaned { .. }
        )
    }
}

/// Errors from the event-creation workflow.
#[derive(Debug, Error)]
pub enum CreateEventError {
    /// No authenticated user to attribute the event to; nothing was
    /// uploaded or written.
    #[error("no authenticated user to attribute the event to")]
    NotAuthenticated,

    /// A workflow step failed after zero or more steps had committed.
    #[error("event creation failed at step {step}")]
    Failed {
        /// The step that failed.
        step: EventStep,
        /// The underlying cause.
        #[source]
        source: EventStepError,
        /// Outcomes of the compensations that ran for committed steps.
        compensation: Vec<CompensationOutcome>,
    },
}

impl CreateEventError {
    /// The failing step, if the workflow got that far.
    #[must_use]
    pub const fn step(&self) -> Option<EventStep> {
        match self {
            Self::NotAuthenticated => None,
            Self::Failed { step, .. } => Some(*step),
        }
    }

    /// Resources the compensation pass could not clean up.
    #[must_use]
    pub fn orphans(&self) -> Vec<&CompensationOutcome> {
        match self {
            Self::NotAuthenticated => Vec::new(),
            Self::Failed { compensation, .. } => {
                compensation.iter().filter(|o| o.is_orphan()).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_display_names() {
        assert_eq!(EventStep::UploadBanner.to_string(), "upload-banner");
        assert_eq!(EventStep::WriteDocument.to_string(), "write-document");
        assert_eq!(
            EventStep::ProvisionRegistrations.to_string(),
            "provision-registrations"
        );
        assert_eq!(
            EventStep::ProvisionSponsors.to_string(),
            "provision-sponsors"
        );
    }

    #[test]
    fn test_orphans_are_filtered_from_compensation() {
        let error = CreateEventError::Failed {
            step: EventStep::ProvisionRegistrations,
            source: PlatformError::RateLimited.into(),
            compensation: vec![
                CompensationOutcome::DocumentOrphaned {
                    document_id: "d1".to_string(),
                    source: PlatformError::RateLimited,
                },
                CompensationOutcome::BannerDeleted {
                    file_id: "f1".to_string(),
                },
            ],
        };

        assert_eq!(error.step(), Some(EventStep::ProvisionRegistrations));
        assert_eq!(error.orphans().len(), 1);
    }
}
