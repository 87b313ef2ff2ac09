// SPDX-License-Identifier: MPL-2.0
//! Namespaced key-value store over the application data directory.
//!
//! Values are CBOR-encoded, one file per key, all carrying the fixed
//! `meme_studio_` prefix so [`KeyValueStore::clear`] can sweep the namespace
//! without touching unrelated files. Every operation fails soft: a corrupt or
//! unreadable entry yields the caller's default instead of an error, and
//! write failures report `false` rather than propagate.

use crate::app::paths;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Namespace prefix applied to every stored key.
pub const STORE_PREFIX: &str = "meme_studio_";

/// File extension for stored values.
const VALUE_EXT: &str = "cbor";

/// Handle to the on-disk key-value namespace.
#[derive(Debug, Clone, Default)]
pub struct KeyValueStore {
    /// Optional base directory override (tests, portable deployments).
    base_dir: Option<PathBuf>,
}

impl KeyValueStore {
    /// Store rooted at the default application data directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store rooted at an explicit directory.
    #[must_use]
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir: Some(base_dir),
        }
    }

    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(self.base_dir.clone())
            .map(|dir| dir.join(format!("{STORE_PREFIX}{key}.{VALUE_EXT}")))
    }

    /// Encodes and writes `value` under `key`.
    ///
    /// Returns `true` on success. Failures are logged and reported as
    /// `false`; the UI keeps running on its in-memory state either way.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let Some(path) = self.entry_path(key) else {
            return false;
        };

        if let Some(parent) = path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                tracing::warn!(key, %error, "storage: could not create data directory");
                return false;
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                let writer = BufWriter::new(file);
                match ciborium::into_writer(value, writer) {
                    Ok(()) => true,
                    Err(error) => {
                        tracing::warn!(key, %error, "storage: encode failed");
                        false
                    }
                }
            }
            Err(error) => {
                tracing::warn!(key, %error, "storage: write failed");
                false
            }
        }
    }

    /// Reads and decodes the value under `key`, or returns `default`.
    ///
    /// Missing, unreadable, and corrupt entries all resolve to the default;
    /// the decode failure is logged once.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(path) = self.entry_path(key) else {
            return default;
        };
        if !path.exists() {
            return default;
        }

        match fs::File::open(&path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match ciborium::from_reader(reader) {
                    Ok(value) => value,
                    Err(error) => {
                        tracing::warn!(key, %error, "storage: decode failed, using default");
                        default
                    }
                }
            }
            Err(error) => {
                tracing::warn!(key, %error, "storage: read failed, using default");
                default
            }
        }
    }

    /// Deletes the entry under `key`. Returns `true` if removal succeeded
    /// (a missing entry counts as success).
    pub fn remove(&self, key: &str) -> bool {
        let Some(path) = self.entry_path(key) else {
            return false;
        };
        if !path.exists() {
            return true;
        }
        fs::remove_file(&path).is_ok()
    }

    /// Removes every entry in the namespace, leaving other files in the data
    /// directory untouched. Returns `false` if any removal failed.
    pub fn clear(&self) -> bool {
        let Some(dir) = paths::get_app_data_dir_with_override(self.base_dir.clone()) else {
            return false;
        };
        let Ok(entries) = fs::read_dir(&dir) else {
            // Nothing stored yet.
            return true;
        };

        let mut ok = true;
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(STORE_PREFIX) {
                ok &= fs::remove_file(entry.path()).is_ok();
            }
        }
        ok
    }
}
