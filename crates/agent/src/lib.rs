// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! roost-agent: the polling beacon runtime.
//!
//! An agent bootstraps (or resumes) a session, then polls the server at a
//! fixed interval: report buffered results, receive new tasks, run each in
//! its own worker. Results stay buffered until a poll succeeds, so nothing
//! is lost across server outages.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod buffer;
pub mod exec;
pub mod sync;

pub use buffer::ResultBuffer;
pub use sync::{AgentError, Beacon};
