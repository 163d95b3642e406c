//! # CodeReader Store
//!
//! Storage side of the CodeReader barcode scanner.
//!
//! ## Architecture
//! The library is split into a core (GUI-agnostic) and presentation layers:
//! - `core` - Database initialization and migration, scan history,
//!   settings and the cover view model
//! - `events` - Event-driven reporting (GUI-ready)
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{CodeReaderError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    // A host that already installed a subscriber keeps it
    let _ = tracing::subscriber::set_global_default(subscriber);
}
