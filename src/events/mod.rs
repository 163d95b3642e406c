//! # Events Module
//!
//! Event-driven architecture for GUI-ready reporting.
//!
//! ## Design
//! The core library emits events through channels, allowing any UI
//! (CLI, GUI) to subscribe: database initialization reports its
//! migration steps, and the cover view forwards window requests.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! let db = Database::initialize(&paths, &mut settings, &sender)?;
//! drop(sender);
//!
//! for event in receiver.iter() {
//!     if let Event::Database(DatabaseEvent::Warning { message }) = event {
//!         eprintln!("{}", message);
//!     }
//! }
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
