//! # dockrun-core
//!
//! Workspace-aware container lifecycle orchestration:
//! - [`classify`]: partitions runtime containers into tracked/non-related
//!   and running/stopped.
//! - [`executor`]: runs one lifecycle action over a list concurrently and
//!   reports outcomes in input order.
//! - [`workflow`]: the user commands (stop, stop non-related, start, add,
//!   remove) built on the two above.
//!
//! Collaborators are injected: a runtime client, a workspace store and an
//! interaction surface.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod classify;
pub mod container;
pub mod executor;
pub mod surface;
pub mod workflow;
pub mod workspace;
