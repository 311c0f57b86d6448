//! `koeri-quake-map` library crate.
//!
//! The binary (`quake`) is a thin wrapper around this library so that:
//!
//! - the catalog → map pipeline is testable without spawning processes
//! - nothing runs at load time; callers invoke `app::pipeline` on demand
//! - other front-ends (GUI, service) can reuse the same typed outcomes

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod filter;
pub mod io;
pub mod map;
pub mod report;
pub mod severity;
