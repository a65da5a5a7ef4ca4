//! Versioned bitcode blobs for the two settings records.
//!
//! Layout: one version byte followed by the bitcode payload. Load failures
//! of any kind fall back to defaults with a `warn!`; a missing file is the
//! normal first-run case and stays silent.

use std::fs;
use std::io::ErrorKind;

use bevy::prelude::*;

use crate::atomic_write::atomic_write;
use crate::settings_error::SettingsError;

/// Current blob format version.
pub const SETTINGS_VERSION: u8 = 1;

/// On-disk locations of the two settings blobs.
#[derive(Resource, Debug, Clone)]
pub struct SettingsPaths {
    pub effects: String,
    pub perf: String,
}

impl Default for SettingsPaths {
    fn default() -> Self {
        Self {
            effects: "settings/effects.bin".to_string(),
            perf: "settings/perf.bin".to_string(),
        }
    }
}

/// Encode a record as a versioned blob.
pub fn encode_blob<T: bitcode::Encode>(value: &T) -> Vec<u8> {
    let mut blob = vec![SETTINGS_VERSION];
    blob.extend(bitcode::encode(value));
    blob
}

/// Decode a versioned blob back into a record.
pub fn decode_blob<T: bitcode::DecodeOwned>(blob: &[u8]) -> Result<T, SettingsError> {
    match blob.split_first() {
        None => Err(SettingsError::Empty),
        Some((&SETTINGS_VERSION, payload)) => Ok(bitcode::decode(payload)?),
        Some((&found, _)) => Err(SettingsError::VersionMismatch {
            expected: SETTINGS_VERSION,
            found,
        }),
    }
}

/// Write a record to `path` atomically.
pub fn store<T: bitcode::Encode>(path: &str, value: &T) -> Result<(), SettingsError> {
    atomic_write(path, &encode_blob(value))?;
    Ok(())
}

/// Read a record from `path`, falling back to the default on any failure.
/// A missing file is expected on first run; anything else gets a `warn!`.
pub fn load_or_default<T: bitcode::DecodeOwned + Default>(path: &str) -> T {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!("failed to read settings file {path}: {e}, using defaults");
            return T::default();
        }
    };
    match decode_blob(&bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!("failed to decode settings file {path}: {e}, using defaults");
            T::default()
        }
    }
}
