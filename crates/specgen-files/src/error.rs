//! Errors of the filesystem sink.

use thiserror::Error;

/// Result alias for sink operations.
pub type Result<T> = std::result::Result<T, FilesError>;

/// Errors raised while writing generated artifacts.
///
/// # Examples
///
/// ```
/// use specgen_files::FilesError;
///
/// let error = FilesError::InvalidPathComponent {
///     path: "src/../etc/passwd".to_string(),
/// };
/// assert!(error.is_invalid_path());
/// assert_eq!(
///     error.to_string(),
///     "Path contains invalid components: src/../etc/passwd"
/// );
/// ```
#[derive(Error, Debug)]
pub enum FilesError {
    /// Path is empty or absolute
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The rejected path
        path: String,
    },

    /// Path contains `..` or `.` segments
    #[error("Path contains invalid components: {path}")]
    InvalidPathComponent {
        /// The rejected path
        path: String,
    },

    /// A filesystem operation failed
    #[error("Failed to {action} {path}: {source}")]
    Io {
        /// What was attempted
        action: &'static str,
        /// Disk path involved
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl FilesError {
    /// Returns `true` if an artifact path was rejected before any write.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. } | Self::InvalidPathComponent { .. }
        )
    }

    /// Returns `true` if the filesystem itself failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use specgen_files::FilesError;
    ///
    /// let error = FilesError::Io {
    ///     action: "create directory",
    ///     path: "out/src".to_string(),
    ///     source: std::io::Error::other("read-only filesystem"),
    /// };
    /// assert!(error.is_io_error());
    /// assert!(!error.is_invalid_path());
    /// ```
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
