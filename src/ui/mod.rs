// SPDX-License-Identifier: MPL-2.0
//! UI components: gallery grid, annotation editor, export actions, toast
//! notifications, and theming.

pub mod editor;
pub mod export;
pub mod gallery;
pub mod notifications;
pub mod theme;
