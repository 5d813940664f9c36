// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! roost-core: session registry, task lifecycle, and wire codec for roost

pub mod macros;

pub mod clock;
pub mod codec;
pub mod id;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod task;

pub use clock::{Clock, FakeClock, SystemClock};
pub use codec::{decode, encode, CodecError};
pub use id::{BeaconId, ParseIdError, TaskId};
pub use protocol::{Bootstrap, SyncReply, SyncUpdate};
pub use registry::BeaconRegistry;
pub use session::{BeaconSession, SharedSession};
pub use task::{Task, TaskError, TaskInfo, TaskKind, TaskMeta, TaskSnapshot, TaskState};
