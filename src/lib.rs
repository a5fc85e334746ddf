#![doc(test(attr(deny(warnings))))]

//! Class Book keeps per-class rosters, session attendance and fees over a
//! rolling six-month window, persisted as JSON documents.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::{ClassBook, StudentDetail};
pub use crate::errors::{ClassBookError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Class Book tracing initialized.");
    });
}
