//! `standup` - A daily-standup tracker
//!
//! This library provides the core functionality for storing, serving,
//! and viewing daily standup entries: a `SQLite`-backed record store, an
//! HTTP resource API, an API client with session state, and a grouped
//! day-by-day view.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod entry;
pub mod error;
pub mod form;
pub mod logging;
pub mod store;
pub mod view;

pub use client::{ApiClient, LoadState, Session};
pub use config::Config;
pub use entry::{EntryPayload, StandupEntry};
pub use error::{Error, Result};
pub use form::EntryForm;
pub use logging::init_logging;
pub use store::{Store, StoreStats};
