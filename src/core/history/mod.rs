//! # Scan History Module
//!
//! Stores and retrieves scan results.
//!
//! ## Features
//! - Persistent storage in the shared SQLite database
//! - Pagination, newest first
//! - Pruning to the configured history size
//! - Delete and clear operations

mod repository;
mod types;

pub use repository::HistoryRepository;
pub use types::{HistoryPage, HistoryRecord};
