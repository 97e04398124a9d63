//! The event-creation workflow.
//!
//! Four dependent network steps against three platform services, with a
//! defined compensating action per committed step. See the crate docs for
//! the flow diagram.

use crate::error::{CompensationOutcome, CreateEventError, EventStep, EventStepError};
use crate::event::{BannerUpload, EventDraft, EventRecord};
use crate::keys::{registrations_collection_id, sponsors_collection_id};
use crate::profile::ProfileStore;
use crate::session::ClientSession;
use gatherly_admin::Sponsor;
use gatherly_platform::{Accounts, Collections, FileBuckets, file_view_url, unique_id};

impl<A, C, F, P, AC> ClientSession<A, C, F, P, AC>
where
    A: Accounts,
    C: Collections,
    F: FileBuckets,
    P: ProfileStore,
    AC: Collections,
{
    /// Create an event: banner upload, event document, and the two
    /// per-event sub-collections.
    ///
    /// Steps run strictly in sequence; sub-collections are provisioned only
    /// after the document write succeeds. On success exactly one event
    /// document, one `reg_<id>` collection and one `spon_<id>` collection
    /// (seeded with `sponsors`) exist, and the returned [`EventRecord`]
    /// names them all.
    ///
    /// On failure, compensations run for the steps that had committed, in
    /// reverse order, and the error reports the failing step plus each
    /// compensation's outcome.
    ///
    /// # Errors
    ///
    /// - [`CreateEventError::NotAuthenticated`] if no user snapshot is
    ///   available (nothing is uploaded or written).
    /// - [`CreateEventError::Failed`] naming the step otherwise.
    pub async fn create_event(
        &self,
        draft: &EventDraft,
        banner: BannerUpload,
        sponsors: &[Sponsor],
    ) -> std::result::Result<EventRecord, CreateEventError> {
        let created_by = self
            .creator_id()
            .ok_or(CreateEventError::NotAuthenticated)?;

        let banner_file = self
            .files
            .create_file(
                &self.config.banner_bucket_id,
                &unique_id(),
                &banner.file_name,
                banner.bytes,
            )
            .await
            .map_err(|source| failed(EventStep::UploadBanner, source.into(), Vec::new()))?;

        let banner_url = file_view_url(
            &self.config.endpoint,
            &self.config.banner_bucket_id,
            &banner_file.id,
            &self.config.project_id,
        );

        let document = match self
            .collections
            .create_document(
                &self.config.events_collection_id,
                &unique_id(),
                draft.document_payload(&banner_url, &created_by),
            )
            .await
        {
            Ok(document) => document,
            Err(source) => {
                let compensation = vec![self.discard_banner(&banner_file.id).await];
                return Err(failed(EventStep::WriteDocument, source.into(), compensation));
            }
        };

        let reg_id = registrations_collection_id(&document.id);
        if let Err(source) = self
            .provisioner
            .create_registration_collection(&reg_id, &draft.name)
            .await
        {
            let compensation = self.unwind_event(&document.id, &banner_file.id).await;
            return Err(failed(
                EventStep::ProvisionRegistrations,
                source.into(),
                compensation,
            ));
        }

        let spon_id = sponsors_collection_id(&document.id);
        if let Err(source) = self
            .provisioner
            .create_sponsor_collection(&spon_id, &draft.name, sponsors, &created_by)
            .await
        {
            let compensation = self.unwind_event(&document.id, &banner_file.id).await;
            return Err(failed(
                EventStep::ProvisionSponsors,
                source.into(),
                compensation,
            ));
        }

        tracing::info!(
            event_id = %document.id,
            registrations = %reg_id,
            sponsors = %spon_id,
            "event created"
        );
        Ok(EventRecord {
            event_id: document.id,
            banner_file_id: banner_file.id,
            banner_url,
            created_by,
            registrations_collection_id: reg_id,
            sponsors_collection_id: spon_id,
        })
    }

    /// Compensation for a committed banner upload.
    async fn discard_banner(&self, file_id: &str) -> CompensationOutcome {
        match self
            .files
            .delete_file(&self.config.banner_bucket_id, file_id)
            .await
        {
            Ok(()) => {
                tracing::info!(file_id, "banner upload compensated");
                CompensationOutcome::BannerDeleted {
                    file_id: file_id.to_string(),
                }
            }
            Err(source) => {
                tracing::error!(file_id, %source, "banner compensation failed, file orphaned");
                CompensationOutcome::BannerOrphaned {
                    file_id: file_id.to_string(),
                    source,
                }
            }
        }
    }

    /// Compensation for a committed event document write.
    async fn discard_document(&self, document_id: &str) -> CompensationOutcome {
        match self
            .collections
            .delete_document(&self.config.events_collection_id, document_id)
            .await
        {
            Ok(()) => {
                tracing::info!(document_id, "event document compensated");
                CompensationOutcome::DocumentDeleted {
                    document_id: document_id.to_string(),
                }
            }
            Err(source) => {
                tracing::error!(document_id, %source, "document compensation failed, record orphaned");
                CompensationOutcome::DocumentOrphaned {
                    document_id: document_id.to_string(),
                    source,
                }
            }
        }
    }

    /// Unwind both committed steps, newest first.
    async fn unwind_event(&self, document_id: &str, file_id: &str) -> Vec<CompensationOutcome> {
        vec![
            self.discard_document(document_id).await,
            self.discard_banner(file_id).await,
        ]
    }
}

fn failed(
    step: EventStep,
    source: EventStepError,
    compensation: Vec<CompensationOutcome>,
) -> CreateEventError {
    CreateEventError::Failed {
        step,
        source,
        compensation,
    }
}
