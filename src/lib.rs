// SPDX-License-Identifier: MPL-2.0
//! `meme_studio` is a desktop meme browser and annotator built with the Iced
//! GUI framework.
//!
//! It aggregates meme templates and GIFs from several public providers,
//! renders them in a paged gallery, and lets the user burn text captions and
//! color filters into a full-resolution copy of any image before exporting it.

pub mod app;
pub mod config;
pub mod error;
pub mod media;
pub mod providers;
pub mod storage;
pub mod ui;
