// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Beacon registry: owns every session, keyed by beacon id.
//!
//! An explicit value owned by the server process and passed by reference
//! into every handler — there is no static registry state. The map only
//! grows: sessions are never evicted or expired, even though `last_seen`
//! is tracked (a known gap, preserved deliberately).

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::clock::Clock;
use crate::id::BeaconId;
use crate::session::{BeaconSession, SharedSession};

#[derive(Debug, Default)]
pub struct BeaconRegistry {
    // Map lock covers insertion so racing first contacts for one id
    // cannot create duplicate sessions.
    sessions: Mutex<HashMap<BeaconId, SharedSession>>,
}

impl BeaconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The existing session for `id`, or a new one created under it.
    ///
    /// Creation under an unseen id is how pre-seeded and restarted beacons
    /// come back: it is logged as a recovery, never rejected.
    pub fn get_or_create(&self, id: BeaconId, clock: &impl Clock) -> SharedSession {
        let mut sessions = self.sessions.lock();
        Arc::clone(sessions.entry(id).or_insert_with(|| {
            info!(beacon = %id, "recovered beacon");
            Arc::new(Mutex::new(BeaconSession::new(id, clock)))
        }))
    }

    /// Register a session under a fresh random id (bootstrap path).
    pub fn create_new(&self, clock: &impl Clock) -> (BeaconId, SharedSession) {
        let id = BeaconId::new();
        let session = Arc::new(Mutex::new(BeaconSession::new(id, clock)));
        self.sessions.lock().insert(id, Arc::clone(&session));
        info!(beacon = %id, "serving new beacon");
        (id, session)
    }

    /// Ids of every known session.
    pub fn ids(&self) -> Vec<BeaconId> {
        self.sessions.lock().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
