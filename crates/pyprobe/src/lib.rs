//! pyprobe: analyze Python snippets over HTTP or from the command line.
//!
//! The analysis itself lives in `pyprobe-analyze`; this crate adds the HTTP
//! API, CLI commands, configuration and logging around it.

pub mod commands;
pub mod config;
pub mod http;
pub mod logging;
pub mod output;

pub use config::PyprobeConfig;
pub use http::{AppState, router};
