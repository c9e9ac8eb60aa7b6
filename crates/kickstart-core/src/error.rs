//! Error types for Kickstart core operations.
//!
//! Errors fall into three groups:
//! - Configuration errors, raised once when a widget is constructed.
//! - Programmer errors at runtime (bad index, use after destroy), always propagated.
//! - Storage and serialization failures, which callers such as
//!   [`PreferenceStore`](crate::storage::PreferenceStore) downgrade to defaults.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Kickstart core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Navigation bar configuration is malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An item index is outside the top-level menu.
    #[error("Index {index} out of range for {len} menu items")]
    Range {
        /// The index that was requested.
        index: usize,
        /// Number of top-level items.
        len: usize,
    },

    /// The item at this index has no dropdown children.
    #[error("Menu item {0} is not a dropdown trigger")]
    NotADropdown(usize),

    /// The widget was destroyed and can no longer be used.
    #[error("Navigation bar has been destroyed")]
    State,

    /// A required element was not found in the document.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The persistent key/value medium failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error reports a malformed configuration.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this error reports an out-of-range index.
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. } | Self::NotADropdown(_))
    }

    /// Whether this error reports use of a destroyed widget.
    #[must_use]
    pub const fn is_state(&self) -> bool {
        matches!(self, Self::State)
    }
}

/// Validation failures for a navigation bar configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The collapse breakpoint must be a positive pixel width.
    #[error("collapseAt must be greater than zero")]
    InvalidBreakpoint,

    /// More than one top-level item is marked active.
    #[error("{count} items are marked active, at most one is allowed")]
    MultipleActive {
        /// How many items were marked active.
        count: usize,
    },

    /// A dropdown child declares its own children.
    #[error("Dropdown item '{parent}' has nested dropdown '{child}'")]
    NestedDropdown {
        /// Text of the top-level dropdown.
        parent: String,
        /// Text of the offending child.
        child: String,
    },

    /// A child item is marked active; only top-level items can be active.
    #[error("Dropdown child '{0}' cannot be marked active")]
    ActiveChild(String),

    /// A navigable item has no url.
    #[error("Menu item '{0}' has no url and no dropdown items")]
    MissingUrl(String),

    /// Brand or item text is empty.
    #[error("Empty text in {0}")]
    EmptyText(&'static str),

    /// The configuration document could not be parsed.
    #[error("Invalid configuration document: {0}")]
    Parse(String),
}

/// Failures reported by a persistent key/value medium.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The medium ran out of space.
    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded {
        /// The key being written.
        key: String,
    },

    /// The medium is not available in this environment.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure.
    #[error("Storage operation failed: {0}")]
    Backend(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_display() {
        let err = Error::Range { index: 5, len: 3 };
        assert_eq!(err.to_string(), "Index 5 out of range for 3 menu items");
        assert!(err.is_range());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: Error = ConfigError::MultipleActive { count: 2 }.into();
        assert!(err.is_config());
        assert!(err.to_string().contains("2 items are marked active"));
    }

    #[test]
    fn test_state_error_display() {
        let err = Error::State;
        assert!(err.is_state());
        assert_eq!(err.to_string(), "Navigation bar has been destroyed");
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: Error = StorageError::QuotaExceeded {
            key: "app:theme".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("app:theme"));
    }
}
