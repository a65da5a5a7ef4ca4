use std::fmt;

/// Errors that can occur while reading or writing a settings blob.
///
/// Load failures are absorbed at the call site (defaults win), but the
/// typed enum keeps the causes matchable and testable instead of stringly
/// logged.
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// Bitcode decoding failed (corrupt or truncated blob).
    Decode(String),
    /// The blob's version byte is newer than this build supports.
    VersionMismatch { expected: u8, found: u8 },
    /// The file was empty.
    Empty,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "I/O error: {e}"),
            SettingsError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SettingsError::VersionMismatch { expected, found } => write!(
                f,
                "Version mismatch: blob is v{found}, but this build only supports v{expected}"
            ),
            SettingsError::Empty => write!(f, "Settings file is empty"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<bitcode::Error> for SettingsError {
    fn from(e: bitcode::Error) -> Self {
        SettingsError::Decode(e.to_string())
    }
}
