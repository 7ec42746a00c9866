//! Error types for panel nesting.

use thiserror::Error;

/// Result type alias for nesting operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a nesting job.
///
/// Malformed panels (zero quantity, non-positive dimensions) are not errors:
/// they contribute no pieces and are logged by the engine instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested sheet size is not in the registry.
    #[error("Unknown sheet size: {name:?}")]
    UnknownSheetSize {
        /// The name that was looked up.
        name: String,
    },

    /// A sheet size with a non-positive or non-finite dimension.
    #[error("Invalid sheet size {name:?}: {length_mm} x {width_mm} mm")]
    InvalidSheetSize {
        /// Registry name of the sheet.
        name: String,
        /// Requested length.
        length_mm: f64,
        /// Requested width.
        width_mm: f64,
    },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A piece is larger than the sheet in every orientation it may take.
    #[error(
        "Panel {panel_id:?} ({length_mm} x {width_mm} mm) cannot be placed on sheet {sheet:?}"
    )]
    Unplaceable {
        /// ID of the offending panel.
        panel_id: String,
        /// Native panel length.
        length_mm: f64,
        /// Native panel width.
        width_mm: f64,
        /// Sheet size name the panel was nested against.
        sheet: String,
    },

    /// Internal error (a packing strategy broke its contract).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true for errors caused by the caller's request rather than the engine.
    ///
    /// Callers exposing the engine over a request boundary map these to a
    /// bad-request response.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownSheetSize { .. } | Self::InvalidSheetSize { .. } | Self::ConfigError(_)
        )
    }
}
