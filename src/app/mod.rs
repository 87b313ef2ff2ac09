// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gallery and editor.
//!
//! The `App` struct wires together the domains (providers, storage, editor,
//! export) and translates component events into side effects like history
//! persistence, network fetches, and clipboard access. Policy decisions
//! (window sizing, session counting, toast routing) stay close to the main
//! update loop so user-facing behavior is easy to audit.

mod message;
pub mod paths;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message, Tab};
pub use screen::Screen;

use crate::config::{self, Config};
use crate::media::{ImageCache, ImageData};
use crate::storage::{KeyValueStore, ViewHistory};
use crate::ui::editor;
use crate::ui::gallery;
use crate::ui::notifications;
use crate::ui::theme::ThemeMode;
use iced::{window, Task};
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 560;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const MIN_WINDOW_WIDTH: u32 = 520;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// Root Iced application state bridging UI components, storage, and the
/// provider aggregator.
pub struct App {
    screen: Screen,
    tab: Tab,
    gallery: gallery::State,
    editor: Option<editor::State>,
    /// Monotonic session counter; stamps editor sessions so stale async
    /// loads can be recognized and dropped.
    session_counter: u64,
    notifications: notifications::Manager,
    theme_mode: ThemeMode,
    store: KeyValueStore,
    history: ViewHistory,
    config: Config,
    http: reqwest::Client,
    /// Tile thumbnails, keyed by source URL (or local path).
    thumbnails: HashMap<String, ImageData>,
    /// Thumbnail fetches already in flight.
    pending_thumbnails: HashSet<String>,
    /// Decoded full-resolution images, keyed by URL.
    image_cache: ImageCache,
    /// Locally uploaded files shown in the Uploads tab.
    uploads: Vec<std::path::PathBuf>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("tab", &self.tab)
            .field("editor_open", &self.editor.is_some())
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and kicks off the initial aggregate
    /// fetch.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.data_dir, flags.config_dir);

        let config = config::load().unwrap_or_default();
        let store = KeyValueStore::new();
        let history = ViewHistory::load(&store);
        let theme_mode = ThemeMode::load(&store);

        let http = reqwest::Client::builder()
            .user_agent(concat!("MemeStudio/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        let mut gallery = gallery::State::new(config.gallery_page_size());
        gallery.set_loading();

        let app = App {
            screen: Screen::Gallery,
            tab: Tab::Search,
            gallery,
            editor: None,
            session_counter: 0,
            notifications: notifications::Manager::new(),
            theme_mode,
            store,
            history,
            config,
            http,
            thumbnails: HashMap::new(),
            pending_thumbnails: HashSet::new(),
            image_cache: ImageCache::new(),
            uploads: Vec::new(),
        };

        let initial_fetch = app.fetch_listing_task();
        (app, initial_fetch)
    }

    fn title(&self) -> String {
        match &self.editor {
            Some(editor) => format!("Meme Studio \u{2014} {}", editor.source().title()),
            None => "Meme Studio".to_string(),
        }
    }

    fn theme(&self) -> iced::Theme {
        self.theme_mode.iced_theme()
    }
}
