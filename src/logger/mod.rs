//! Process-wide `tracing` setup. The logging macros are re-exported so the
//! rest of the crate imports them from here.
//! See `bin/logger_demo.rs` for a binary that exercises the reload path.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
