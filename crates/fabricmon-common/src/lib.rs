//! Common infrastructure for the FabricMon topology pipeline.
//!
//! This crate provides shared functionality for the pipeline crates:
//!
//! - [`error`]: Error types for pipeline operations
//! - [`fsio`]: Best-effort input loading and buffered output writing
//!
//! # Failure policy
//!
//! The pipeline favors "best-effort with a documented gap" over hard
//! failure, because partial topology information is still operationally
//! useful:
//!
//! 1. A missing or unreadable input file degrades to an empty structure
//!    and is logged, never raised ([`fsio::read_optional`]).
//! 2. A malformed line is skipped at the line level; no parse error
//!    propagates past it.
//! 3. Output writes are the only fatal condition: the buffer is built
//!    fully in memory first, so a failed write never leaves a partial
//!    output file behind ([`fsio::write_buffered`]).

pub mod error;
pub mod fsio;

// Re-export commonly used items at crate root
pub use error::{FabricError, FabricResult};
pub use fsio::{read_optional, write_buffered};
