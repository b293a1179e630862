//! Monitoring plugin that reports how long ago each ZFS pool was scrubbed.
//!
//! `zpool list` → `zpool status <pool>` → [`collectors::scan::ScanParser`]
//! → [`alerts::evaluate`] → [`util::report::generate`].

pub mod alerts;
pub mod check;
pub mod clock;
pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod util;
