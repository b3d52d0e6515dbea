//! Wire contracts shared by the Multichat frontend and the gateway API.
//!
//! Every type here mirrors a JSON shape produced or consumed by the backend.
//! The crate is I/O free so it can be tested on the host.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
