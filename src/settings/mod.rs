//! TOML settings loaded through `config`, plus the command line.
//! See `bin/settings_demo.rs` for a binary that prints what gets loaded.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
