// Lottery Draw - Core Library
// Exposes all modules for use in the CLI, the TUI, and tests

pub mod input;  // Form-field parsing and validation
pub mod ledger; // Persisted record set (participant -> issued numbers)
pub mod pool;   // Random number generation with rejection sampling
pub mod store;  // String-keyed persistence boundary

// Only compile the UI module when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use input::{parse_draw_request, DrawRequest, ValidationError, DEFAULT_DIGITS};
pub use ledger::{DrawOutcome, Entry, FilteredEntry, Ledger, STORE_KEY};
pub use pool::{capacity, generate, has_repeating_digits};
pub use store::{FileStore, MemoryStore, Store};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
