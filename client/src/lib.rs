//! # Gatherly Client
//!
//! Client-facing session and event-creation flows for the Gatherly event
//! platform.
//!
//! [`ClientSession`] is the application's handle on the backing platform:
//! it owns the auth operations (hosted OAuth redirects, email/password,
//! magic link), the current-user snapshot with its persisted mirror, and
//! the event-creation workflow.
//!
//! ## Event creation is a compensating saga
//!
//! Creating an event is four dependent network steps:
//!
//! ```text
//! upload banner ─► write event document ─► provision reg_<id> ─► provision spon_<id>
//!
//! Compensation (reverse order of committed steps):
//! document write failed      ─► delete banner
//! provisioning failed        ─► delete document ─► delete banner
//! ```
//!
//! There is no cross-service transaction, so each step has a defined
//! compensating action; a compensation that itself fails is reported as an
//! orphaned resource in [`CreateEventError`] instead of being silently
//! leaked.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gatherly_client::{ClientSession, EventDraft, BannerUpload};
//!
//! let mut session = ClientSession::new(config, accounts, collections, files, profiles, provisioner);
//! session.email_login("ada@example.com", "hunter2!").await?;
//! session.fetch_current_user().await?;
//!
//! let record = session
//!     .create_event(&draft, BannerUpload::new("banner.png", bytes), &sponsors)
//!     .await?;
//! println!("created {}", record.event_id);
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod events;
pub mod keys;
pub mod profile;
pub mod session;
pub mod state;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use error::{ClientError, CompensationOutcome, CreateEventError, EventStep, EventStepError, Result};
pub use event::{BannerUpload, EventDraft, EventRecord};
pub use keys::{registrations_collection_id, sponsors_collection_id};
pub use profile::{JsonFileProfileStore, ProfileStore};
pub use session::ClientSession;
pub use state::CurrentUser;

// The provisioning half of the workflow lives in `gatherly-admin`.
pub use gatherly_admin::{AdminProvisioner, ProvisionError, Sponsor};
