// SPDX-License-Identifier: MPL-2.0
//! Top-level screens of the application.

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Gallery,
    Editor,
}
