//! File-based logging for the client.
//!
//! Code throughout the crate logs through `tracing` macros and spans. This
//! module installs the subscriber that turns them into lines in a rotating
//! log file:
//!
//! ```text
//! tracing macros -> EnvFilter -> fmt layer -> RotatingFileWriter -> giveaway.log
//! ```
//!
//! # Features
//!
//! - **File Output**: `giveaway.log` in the data directory
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::{RotatingFileWriter, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
pub use init::init_tracing;
