//! Geodata Common Library
//!
//! Shared error handling and logging setup for the geodata workspace.
//!
//! # Example
//!
//! ```no_run
//! use geodata_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> geodata_common::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("started");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{GeodataError, Result};
