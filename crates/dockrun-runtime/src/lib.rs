//! Container runtime clients for dockrun.
//!
//! The [`backend::RuntimeClient`] trait is the only surface the rest of the
//! workspace sees. Two implementations ship here: a Docker-compatible CLI
//! client and a client over the local JSON state index.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod backend;
pub mod state;
