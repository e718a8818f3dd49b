use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from opening and closing a [`RotatingWriter`].
///
/// Write errors are not here; writes go through [`std::io::Write`] and report
/// plain [`io::Error`]s from the underlying file.
///
/// [`RotatingWriter`]: crate::RotatingWriter
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The log file could not be created or opened for appending.
    #[error("failed to open {}", path.display())]
    Open {
        /// The logical file name of the writer.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// `close` was called while the writer was already closed.
    #[error("attempt to close {} when it is not open", path.display())]
    NotOpen {
        /// The logical file name of the writer.
        path: PathBuf,
    },

    /// Flushing or closing the log file failed.
    #[error("failed to close {}", path.display())]
    Close {
        /// The logical file name of the writer.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// Registering the rotation signal listener failed.
    #[cfg(feature = "signals")]
    #[error("failed to register rotation signals for {}", path.display())]
    Signals {
        /// The logical file name of the writer.
        path: PathBuf,
        /// The underlying registration error.
        #[source]
        source: io::Error,
    },
}
