//! Shared utilities for GutWise prompts
//!
//! This crate provides:
//! - ID types (PromptId, StoreKey)
//! - Time utilities (millisecond timestamps, injectable clocks)
//! - Error types
//! - Default paths for config and data directories

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
