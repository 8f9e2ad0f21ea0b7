//! Filesystem port for writing the rendered document.

use std::path::Path;

/// Writes files to local storage.
///
/// Abstracting the filesystem keeps command tests off the real disk.
pub trait FileSystem: Send + Sync {
    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
