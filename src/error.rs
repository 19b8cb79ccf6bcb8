// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application error taxonomy.
//!
//! Every variant except [`AppError::ConfigMissing`] is recoverable: it is
//! caught where the user action started and shown as a notice.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please draw something or upload an image first!")]
    MissingInput,

    #[error("Could not open image: {0}")]
    Decode(String),

    #[error("Description service error: {0}")]
    DescribeTransport(String),

    #[error("No text returned by the model.")]
    EmptyDescription,

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("{0} not found. Add it to the config file or your environment.")]
    ConfigMissing(&'static str),
}

/// How a recoverable error is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl AppError {
    pub fn severity(&self) -> Severity {
        match self {
            AppError::MissingInput | AppError::EmptyDescription => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Fatal errors stop the application before the UI starts.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::ConfigMissing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_missing_config_is_fatal() {
        assert!(AppError::ConfigMissing("GEMINI_API_KEY").is_fatal());
        assert!(!AppError::Synthesis("boom".into()).is_fatal());
        assert!(!AppError::MissingInput.is_fatal());
    }

    #[test]
    fn test_soft_failures_are_warnings() {
        assert_eq!(AppError::EmptyDescription.severity(), Severity::Warning);
        assert_eq!(AppError::MissingInput.severity(), Severity::Warning);
        assert_eq!(
            AppError::DescribeTransport("timeout".into()).severity(),
            Severity::Error
        );
    }
}
