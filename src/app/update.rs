// SPDX-License-Identifier: MPL-2.0
//! The main update loop: message routing and side-effect orchestration.

use super::{App, Message, Screen, Tab};
use crate::media;
use crate::providers::aggregator;
use crate::storage::ViewHistory;
use crate::ui::editor;
use crate::ui::export;
use crate::ui::gallery;
use crate::ui::notifications::Notification;
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;

/// Longest edge of a gallery thumbnail, in pixels.
const THUMBNAIL_EDGE: u32 = 296;

/// History tiles shown on the History tab.
const HISTORY_TILE_LIMIT: usize = 50;

impl App {
    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Gallery(msg) => {
                let event = self.gallery.update(msg);
                let follow = match event {
                    gallery::Event::None => Task::none(),
                    gallery::Event::OpenRecord(record) => {
                        self.open_editor(editor::ImageSource::Remote {
                            url: record.url,
                            title: record.title,
                        })
                    }
                    gallery::Event::RequestListing => self.fetch_listing_task(),
                    gallery::Event::RequestSearch(query) => self.search_task(query),
                };
                Task::batch([follow, self.request_missing_thumbnails()])
            }

            Message::Editor(msg) => {
                let Some(editor_state) = &mut self.editor else {
                    return Task::none();
                };
                let event = editor_state.update(msg);
                self.handle_editor_event(event)
            }

            Message::EditorImageFetched {
                generation,
                url,
                result,
            } => {
                if let (Some(url), Ok(image)) = (&url, &result) {
                    self.image_cache.insert_shared(url, Arc::clone(image));
                }
                if let Some(editor_state) = &mut self.editor {
                    let event =
                        editor_state.update(editor::Message::ImageLoaded { generation, result });
                    return self.handle_editor_event(event);
                }
                Task::none()
            }

            Message::ListingFetched(records) | Message::SearchFetched(records) => {
                self.gallery.set_records(records);
                self.request_missing_thumbnails()
            }

            Message::ThumbnailFetched { url, result } => {
                self.pending_thumbnails.remove(&url);
                match result {
                    Ok(data) => {
                        self.thumbnails.insert(url, data);
                    }
                    Err(error) => {
                        // Thumbnails are best effort; a missing one leaves a
                        // placeholder tile rather than a toast.
                        tracing::debug!(url, %error, "thumbnail fetch failed");
                    }
                }
                Task::none()
            }

            Message::TabSelected(tab) => {
                self.tab = tab;
                self.request_missing_thumbnails()
            }

            Message::HistoryOpened { url, name } => {
                self.open_editor(editor::ImageSource::Remote { url, title: name })
            }

            Message::UploadOpened(path) => {
                self.open_editor(editor::ImageSource::Local { path })
            }

            Message::UploadRequested => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
                        .pick_files()
                        .await
                        .map(|handles| {
                            handles
                                .into_iter()
                                .map(|handle| handle.path().to_path_buf())
                                .collect()
                        })
                        .unwrap_or_default()
                },
                Message::UploadPicked,
            ),

            Message::UploadPicked(paths) => self.add_uploads(paths),

            Message::ThemeToggled => {
                self.theme_mode = self.theme_mode.toggled();
                self.theme_mode.persist(&self.store);
                let label = if self.theme_mode.is_dark() {
                    "Dark mode enabled"
                } else {
                    "Light mode enabled"
                };
                self.notifications.push(Notification::info(label));
                Task::none()
            }

            Message::ClearStoredData => {
                if self.store.clear() {
                    self.history = ViewHistory::default();
                    self.notifications
                        .push(Notification::success("Stored data cleared"));
                } else {
                    self.notifications
                        .push(Notification::warning("Could not clear stored data"));
                }
                Task::none()
            }

            Message::DownloadFinished(result) => {
                match result {
                    Ok(Some(_path)) => self
                        .notifications
                        .push(Notification::success("Meme downloaded")),
                    Ok(None) => {} // dialog cancelled
                    Err(error) => self
                        .notifications
                        .push(Notification::error(error.user_message())),
                }
                Task::none()
            }

            Message::Notification(msg) => {
                self.notifications.handle_message(&msg);
                Task::none()
            }

            Message::Tick(_now) => {
                self.notifications.tick();
                Task::none()
            }

            Message::EscapePressed => {
                if self.editor.is_some() {
                    self.close_editor();
                }
                Task::none()
            }

            Message::DownloadShortcut => {
                if self.editor.is_some() {
                    self.download_task()
                } else {
                    Task::none()
                }
            }

            Message::CopyShortcut => {
                if self.editor.is_some() {
                    self.copy_current();
                }
                Task::none()
            }
        }
    }

    fn handle_editor_event(&mut self, event: editor::Event) -> Task<Message> {
        match event {
            editor::Event::None => Task::none(),
            editor::Event::Closed => {
                self.close_editor();
                Task::none()
            }
            editor::Event::DownloadRequested => self.download_task(),
            editor::Event::CopyRequested => {
                self.copy_current();
                Task::none()
            }
            editor::Event::Notify(notification) => {
                self.notifications.push(notification);
                Task::none()
            }
        }
    }

    /// Opens a fresh editor session for `source`, records the view in
    /// history, and starts the image load.
    fn open_editor(&mut self, source: editor::ImageSource) -> Task<Message> {
        self.session_counter += 1;
        let generation = self.session_counter;

        match &source {
            editor::ImageSource::Remote { url, title } => {
                self.history.record(&self.store, url, title);
            }
            editor::ImageSource::Local { path } => {
                self.history
                    .record(&self.store, &path.display().to_string(), &source.title());
            }
        }

        self.editor = Some(editor::State::new(source.clone(), generation));
        self.screen = Screen::Editor;

        match source {
            editor::ImageSource::Remote { url, .. } => {
                if let Some(cached) = self.image_cache.get(&url) {
                    return Task::done(Message::EditorImageFetched {
                        generation,
                        url: None,
                        result: Ok(cached),
                    });
                }
                let client = self.http.clone();
                Task::perform(
                    async move {
                        let result = media::image::fetch_and_decode(&client, &url)
                            .await
                            .map(Arc::new);
                        (url, result)
                    },
                    move |(url, result)| Message::EditorImageFetched {
                        generation,
                        url: Some(url),
                        result,
                    },
                )
            }
            editor::ImageSource::Local { path } => Task::perform(
                async move { media::image::load_image_from_path(&path).map(Arc::new) },
                move |result| Message::EditorImageFetched {
                    generation,
                    url: None,
                    result,
                },
            ),
        }
    }

    fn close_editor(&mut self) {
        self.editor = None;
        self.screen = Screen::Gallery;
    }

    pub(crate) fn fetch_listing_task(&self) -> Task<Message> {
        let client = self.http.clone();
        let config = self.config.clone();
        Task::perform(
            async move { aggregator::fetch_all(&client, &config).await },
            Message::ListingFetched,
        )
    }

    fn search_task(&self, query: String) -> Task<Message> {
        let client = self.http.clone();
        let config = self.config.clone();
        Task::perform(
            async move { aggregator::search_all(&client, &config, &query).await },
            Message::SearchFetched,
        )
    }

    /// Spawns thumbnail fetches for every tile visible on the current tab
    /// that has neither a cached thumbnail nor a fetch in flight.
    fn request_missing_thumbnails(&mut self) -> Task<Message> {
        let wanted: Vec<String> = match self.tab {
            Tab::Search => self
                .gallery
                .visible_records()
                .iter()
                .map(|record| record.url.clone())
                .collect(),
            Tab::History => self
                .history
                .entries()
                .iter()
                .take(HISTORY_TILE_LIMIT)
                .map(|entry| entry.url.clone())
                .collect(),
            // Upload thumbnails are decoded locally at pick time.
            Tab::Uploads => Vec::new(),
        };

        let mut tasks = Vec::new();
        for url in wanted {
            if self.thumbnails.contains_key(&url) || self.pending_thumbnails.contains(&url) {
                continue;
            }
            // Local paths recorded in history can't be fetched over HTTP.
            if !url.starts_with("http") {
                continue;
            }
            self.pending_thumbnails.insert(url.clone());
            tasks.push(self.thumbnail_task(url));
        }
        Task::batch(tasks)
    }

    fn thumbnail_task(&self, url: String) -> Task<Message> {
        let client = self.http.clone();
        Task::perform(
            async move {
                let result = media::image::fetch_and_decode(&client, &url)
                    .await
                    .map(|image| {
                        let thumb = image.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE);
                        media::dynamic_to_image_data(&thumb)
                    });
                (url, result)
            },
            |(url, result)| Message::ThumbnailFetched { url, result },
        )
    }

    /// Registers picked files in the Uploads tab and decodes their
    /// thumbnails inline.
    fn add_uploads(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        if paths.is_empty() {
            return Task::none();
        }

        let mut added = 0usize;
        for path in paths {
            let key = path.display().to_string();
            if !self.uploads.contains(&path) {
                self.uploads.push(path.clone());
                added += 1;
            }
            if !self.thumbnails.contains_key(&key) {
                match media::image::load_image_from_path(&path) {
                    Ok(image) => {
                        let thumb = image.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE);
                        self.thumbnails
                            .insert(key, media::dynamic_to_image_data(&thumb));
                    }
                    Err(error) => {
                        tracing::debug!(path = %path.display(), %error, "upload decode failed");
                    }
                }
            }
        }

        self.tab = Tab::Uploads;
        if added > 0 {
            self.notifications
                .push(Notification::success("Images uploaded"));
        }
        Task::none()
    }

    fn download_task(&self) -> Task<Message> {
        let Some(image) = self
            .editor
            .as_ref()
            .and_then(|editor| editor.base_image())
            .cloned()
        else {
            return Task::none();
        };
        Task::perform(export::save_with_dialog(image), Message::DownloadFinished)
    }

    fn copy_current(&mut self) {
        let Some(image) = self.editor.as_ref().and_then(|editor| editor.base_image()) else {
            return;
        };
        match export::copy_to_clipboard(image) {
            Ok(()) => self
                .notifications
                .push(Notification::success("Copied to clipboard")),
            Err(error) => self
                .notifications
                .push(Notification::warning(error.user_message())),
        }
    }
}
