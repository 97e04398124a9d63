//! # Gatherly Testing
//!
//! Testing utilities for the Gatherly SDK crates.
//!
//! The centerpiece is [`MemoryBackend`]: a deterministic, in-memory
//! implementation of the `gatherly-platform` service traits
//! (`Accounts`, `Collections`, `FileBuckets`). It lets the flow crates run
//! their auth and event-creation logic at memory speed, with scriptable
//! failure injection for exercising compensation paths.
//!
//! ## Example
//!
//! ```
//! use gatherly_testing::{FailOp, MemoryBackend};
//! use gatherly_platform::{Collections, unique_id};
//!
//! # async fn example() -> gatherly_platform::Result<()> {
//! let backend = MemoryBackend::new();
//!
//! // Arm a one-shot failure: the next document write fails, the one after succeeds.
//! backend.fail_next(FailOp::CreateDocument);
//! let first = backend.create_document("events", &unique_id(), serde_json::json!({})).await;
//! assert!(first.is_err());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;

pub use backend::{AttributeSpec, CollectionRecord, FailOp, MemoryBackend};
