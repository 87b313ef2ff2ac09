// SPDX-License-Identifier: MPL-2.0
//! Persistent local storage: a namespaced key-value store and the bounded
//! view history built on top of it.

mod history;
mod kv;

pub use history::{HistoryEntry, ViewHistory, HISTORY_CAP, HISTORY_KEY};
pub use kv::{KeyValueStore, STORE_PREFIX};
