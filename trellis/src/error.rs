// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the GUI session.

use trellis_tree::TreeError;

/// Errors raised by [`System`](crate::System) operations.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// A permanent system widget could not be created during reset.
    #[error("couldn't create the `{widget}` system widget")]
    Construction {
        /// Name of the widget that failed.
        widget: &'static str,
        /// Underlying tree failure.
        #[source]
        source: TreeError,
    },

    /// A tree operation was rejected.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Result type for session operations.
pub type Result<T> = core::result::Result<T, SystemError>;

/// Failure reported by a [`WidgetFactory`](crate::host::WidgetFactory).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No layout exists at the path.
    #[error("layout `{0}` not found")]
    NotFound(String),

    /// The layout exists but could not be understood.
    #[error("malformed layout `{path}`: {reason}")]
    Malformed {
        /// Path that was loaded.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// The layout names a widget kind the factory cannot build.
    #[error("unknown widget kind `{0}`")]
    UnknownKind(String),
}
