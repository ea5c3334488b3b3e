//! Atomic balance transfers
//!
//! Deterministic lock ordering, bounded conflict retry, commission
//! accounting, post-commit notification, bulk batching.

pub mod batch;
pub mod engine;
pub mod error;
pub mod notify;
pub mod retry;

pub use batch::{BatchProcessor, TransferRequest};
pub use engine::TransferEngine;
pub use error::TransferError;
pub use notify::{LoggingSink, NotificationSink, Perspective, TransferCompleted};
