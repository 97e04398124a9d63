//! # Gatherly Admin
//!
//! Privileged provisioning operations for the Gatherly event platform.
//!
//! When an event is created, every event gets two dynamically provisioned
//! sub-collections in the document store:
//!
//! - a **registration** collection that unauthenticated attendees can write
//!   to (self-service sign-up), and
//! - a **sponsor** collection that anyone can read but only the event
//!   creator can modify.
//!
//! That permission asymmetry is deliberate authorization policy, not an
//! accident of wiring; [`AdminProvisioner`] is the only place it is encoded.
//!
//! These operations require a server API key (`RestBackend::with_key`) and
//! are invoked by the event-creation workflow in `gatherly-client`, never
//! directly from untrusted code.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod provisioner;

pub use error::ProvisionError;
pub use provisioner::{AdminProvisioner, Sponsor};
