//! Cold-data archival
//!
//! Moves ledger rows older than the retention cutoff into the archive store,
//! one transactional chunk at a time.

pub mod engine;

pub use engine::ArchivalEngine;
