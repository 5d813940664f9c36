// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! roost-server: the roost control plane.
//!
//! Two HTTP surfaces share one [`ServerCtx`]: a loopback control plane for
//! operators and any number of runtime-managed external listeners for
//! agents. All listeners serve the same agent route table against the same
//! session registry.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod control;
pub mod external;
pub mod lifecycle;
pub mod listeners;

pub use lifecycle::{Config, LifecycleError, Server, ServerCtx};
pub use listeners::{AddOutcome, ListenerError, ListenerSet, RemoveOutcome};
