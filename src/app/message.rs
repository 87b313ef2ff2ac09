// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::media::ImageData;
use crate::providers::MemeRecord;
use crate::ui::editor;
use crate::ui::gallery;
use crate::ui::notifications;
use image_rs::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Gallery tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Uploads,
    History,
}

impl Tab {
    #[must_use]
    pub fn all() -> &'static [Tab] {
        &[Tab::Search, Tab::Uploads, Tab::History]
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Uploads => "Uploads",
            Tab::History => "History",
        }
    }
}

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    Editor(editor::Message),
    Notification(notifications::NotificationMessage),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
    TabSelected(Tab),
    ThemeToggled,
    /// Sweep the persistent key-value namespace (history, theme choice).
    ClearStoredData,
    /// Open the file picker for local images.
    UploadRequested,
    /// Result from the file picker (empty when cancelled).
    UploadPicked(Vec<PathBuf>),
    /// Aggregate listing finished.
    ListingFetched(Vec<MemeRecord>),
    /// Aggregate search finished.
    SearchFetched(Vec<MemeRecord>),
    /// A gallery thumbnail finished fetching/decoding.
    ThumbnailFetched {
        url: String,
        result: Result<ImageData, Error>,
    },
    /// The editor's full-resolution image finished loading.
    EditorImageFetched {
        generation: u64,
        /// Cache key for remote sources; `None` for local files.
        url: Option<String>,
        result: Result<Arc<DynamicImage>, Error>,
    },
    /// The save dialog flow finished (`Ok(None)` = cancelled).
    DownloadFinished(Result<Option<PathBuf>, Error>),
    /// A history tile was clicked.
    HistoryOpened { url: String, name: String },
    /// An uploaded file's tile was clicked.
    UploadOpened(PathBuf),
    /// Keyboard shortcuts.
    EscapePressed,
    DownloadShortcut,
    CopyShortcut,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional data directory override (for the key-value store).
    /// Takes precedence over `MEME_STUDIO_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `MEME_STUDIO_CONFIG_DIR`.
    pub config_dir: Option<String>,
}
