//! Error types for GutWise prompts

use thiserror::Error;

use crate::PromptId;

/// Core error type for prompt operations
#[derive(Debug, Error)]
pub enum GutwiseError {
    #[error("Prompt not found: {0}")]
    PromptNotFound(PromptId),
}

pub type Result<T> = std::result::Result<T, GutwiseError>;
