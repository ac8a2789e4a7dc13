//! Error types for theme loading, conversion and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Theme directory does not exist or is not a directory
    ThemeNotFound {
        /// Configured theme directory
        path: PathBuf,
    },

    /// Theme directory holds no file with an image extension
    EmptyTheme {
        /// Configured theme directory
        path: PathBuf,
    },

    /// A tile inside the theme could not be decoded
    TileLoad {
        /// Path to the tile file
        path: PathBuf,
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// Source image is unreadable or not an image
    InvalidInputImage {
        /// Path supplied by the caller
        path: PathBuf,
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// Configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Composition was stopped through its cancellation flag
    Cancelled {
        /// Grid row at which the stop was observed
        row: u32,
    },

    /// Failed to encode the finished mosaic
    ImageExport {
        /// Destination of the export
        path: PathBuf,
        /// Underlying encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThemeNotFound { path } => {
                write!(f, "Theme directory not found: '{}'", path.display())
            }
            Self::EmptyTheme { path } => {
                write!(f, "No tile images found in theme '{}'", path.display())
            }
            Self::TileLoad { path, source } => {
                write!(f, "Failed to load tile '{}': {source}", path.display())
            }
            Self::InvalidInputImage { path, source } => {
                write!(f, "Could not open image '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Cancelled { row } => {
                write!(f, "Conversion cancelled at grid row {row}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TileLoad { source, .. }
            | Self::InvalidInputImage { source, .. }
            | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl MosaicError {
    /// Whether the failure comes from the theme assets rather than the caller's input
    pub const fn is_theme_error(&self) -> bool {
        matches!(
            self,
            Self::ThemeNotFound { .. } | Self::EmptyTheme { .. } | Self::TileLoad { .. }
        )
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Attach a path and operation name to an I/O failure
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> MosaicError {
    let path = path.into();
    move |source| MosaicError::FileSystem {
        path,
        operation,
        source,
    }
}

/// Create an error for an unusable command-line target path
pub fn io_error(msg: &str) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
