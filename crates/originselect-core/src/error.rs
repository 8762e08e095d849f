use thiserror::Error;

use crate::intent::{IntentField, ModificationAction};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Validation failures for search intents and refinements.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid price range: {0}")]
    InvalidPriceRange(String),

    #[error("cannot {action} on field \"{field}\"")]
    IncompatibleModification {
        action: ModificationAction,
        field: IntentField,
    },
}
