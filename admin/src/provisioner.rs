//! Per-event collection provisioning.

use crate::error::ProvisionError;
use gatherly_platform::{Collection, Collections, Permission, Role, unique_id};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// String attribute width used across the per-event schemas.
const ATTRIBUTE_SIZE: u32 = 50;

/// A sponsor entry supplied at event-creation time.
///
/// The numeric `id` is a client-side form handle; it is not persisted.
/// Seeded rows get a fresh platform id instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    /// Client-side row handle, not stored.
    pub id: u32,
    /// Sponsor display name.
    pub name: String,
    /// Sponsor link.
    pub url: String,
}

/// Privileged provisioner for per-event sub-collections.
///
/// Generic over the document-store handle so flows run against
/// [`gatherly_platform::RestBackend`] in production and the in-memory
/// backend in tests.
#[derive(Debug, Clone)]
pub struct AdminProvisioner<C: Collections> {
    collections: C,
}

impl<C: Collections> AdminProvisioner<C> {
    /// Create a provisioner over a privileged collections handle.
    ///
    /// The handle must carry the server API key; collection management is
    /// rejected for client-scoped credentials.
    #[must_use]
    pub const fn new(collections: C) -> Self {
        Self { collections }
    }

    /// Create an event's registration collection.
    ///
    /// Grants read/update/create/delete to any caller: attendees register
    /// themselves without an account. Defines the attendee schema
    /// (`name`, `email`, `confirm`); seeds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] naming the failed step. On attribute
    /// failure the collection is left behind with a partial schema.
    pub async fn create_registration_collection(
        &self,
        collection_id: &str,
        event_name: &str,
    ) -> Result<Collection, ProvisionError> {
        let collection = self
            .collections
            .create_collection(
                collection_id,
                event_name,
                &[
                    Permission::read(Role::any()),
                    Permission::update(Role::any()),
                    Permission::create(Role::any()),
                    Permission::delete(Role::any()),
                ],
            )
            .await
            .map_err(|source| ProvisionError::CreateCollection {
                collection_id: collection_id.to_string(),
                source,
            })?;

        // `confirm` holds the confirmation token written by the check-in
        // flow; it starts out empty rather than absent.
        let attributes: [(&'static str, Option<&str>); 3] =
            [("name", None), ("email", None), ("confirm", Some(""))];
        for (key, default) in attributes {
            self.collections
                .create_string_attribute(collection_id, key, ATTRIBUTE_SIZE, false, default)
                .await
                .map_err(|source| ProvisionError::DefineAttribute {
                    collection_id: collection_id.to_string(),
                    key,
                    source,
                })?;
        }

        tracing::info!(collection_id, event_name, "registration collection provisioned");
        Ok(collection)
    }

    /// Create an event's sponsor collection and seed it.
    ///
    /// Grants read to any caller but update/create/delete only to
    /// `owner_user_id`: sponsor listings are world-readable and
    /// owner-controlled. Defines the sponsor schema (`name`, `url`), then
    /// writes one row per supplied sponsor under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] naming the failed step; a seed failure
    /// leaves the rows written before it in place.
    pub async fn create_sponsor_collection(
        &self,
        collection_id: &str,
        event_name: &str,
        sponsors: &[Sponsor],
        owner_user_id: &str,
    ) -> Result<Collection, ProvisionError> {
        let collection = self
            .collections
            .create_collection(
                collection_id,
                event_name,
                &[
                    Permission::read(Role::any()),
                    Permission::update(Role::user(owner_user_id)),
                    Permission::create(Role::user(owner_user_id)),
                    Permission::delete(Role::user(owner_user_id)),
                ],
            )
            .await
            .map_err(|source| ProvisionError::CreateCollection {
                collection_id: collection_id.to_string(),
                source,
            })?;

        let attributes: [(&'static str, Option<&str>); 2] = [("name", None), ("url", None)];
        for (key, default) in attributes {
            self.collections
                .create_string_attribute(collection_id, key, ATTRIBUTE_SIZE, false, default)
                .await
                .map_err(|source| ProvisionError::DefineAttribute {
                    collection_id: collection_id.to_string(),
                    key,
                    source,
                })?;
        }

        for (index, sponsor) in sponsors.iter().enumerate() {
            self.collections
                .create_document(
                    collection_id,
                    &unique_id(),
                    json!({ "name": sponsor.name, "url": sponsor.url }),
                )
                .await
                .map_err(|source| ProvisionError::SeedSponsor {
                    collection_id: collection_id.to_string(),
                    index,
                    source,
                })?;
        }

        tracing::info!(
            collection_id,
            event_name,
            rows = sponsors.len(),
            "sponsor collection provisioned"
        );
        Ok(collection)
    }
}
