// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Application-wide error taxonomy.
///
/// None of these are fatal to a session: network failures degrade to empty
/// provider results, storage failures fall back to in-memory defaults, and
/// the rest surface as transient notifications.
#[derive(Debug, Clone)]
pub enum Error {
    /// Provider unreachable, timed out, or answered with a non-success status.
    Network(String),
    /// User input rejected before any mutation (e.g. whitespace-only caption).
    Validation(String),
    /// Image bytes could not be decoded into a raster surface.
    Decode(String),
    /// Persistent key-value store read/write failure.
    Storage(String),
    /// System clipboard unavailable or copy denied.
    Clipboard(String),
    /// Configuration file could not be read or parsed.
    Config(String),
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network(e) => write!(f, "Network error: {}", e),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::Decode(e) => write!(f, "Decode error: {}", e),
            Error::Storage(e) => write!(f, "Storage error: {}", e),
            Error::Clipboard(e) => write!(f, "Clipboard error: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error {
    /// Short message suitable for a toast notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Error::Network(_) => "Network request failed. Please try again.".to_string(),
            Error::Validation(msg) => msg.clone(),
            Error::Decode(_) => "Could not load the image.".to_string(),
            Error::Storage(_) => "Could not save your data.".to_string(),
            Error::Clipboard(_) => "Copy failed. Try download instead.".to_string(),
            Error::Config(_) => "Settings could not be loaded.".to_string(),
            Error::Io(msg) => format!("I/O error: {msg}"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
