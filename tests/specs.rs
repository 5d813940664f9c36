// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end specs: a real server, real sockets, and a real agent.

mod specs {
    pub mod prelude;

    mod beacon {
        mod sync_flow;
        mod tasking;
    }
    mod server {
        mod listeners;
        mod stop;
    }
}
