// ABOUTME: Unified error types for the Kestrel analytics engine
// ABOUTME: Provides AppError with constructor helpers and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

//! # Error Types
//!
//! Structurally invalid input is the only condition the engine rejects;
//! everything else degrades to zeroed or absent sub-metrics. `Internal` exists
//! for conditions that indicate a bug in the engine itself rather than bad
//! caller data.

use thiserror::Error;

/// Result alias used throughout the analytics engine
pub type AppResult<T> = Result<T, AppError>;

/// Application error for the analytics engine
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Input failed structural validation before analysis
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error indicates structurally invalid caller input
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
