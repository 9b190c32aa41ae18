//! Storage layer for persisted preferences.
//!
//! Favorites are the only preference the client keeps. They are stored as a
//! JSON array under one key of a small key-value document, written atomically
//! on every change.
//!
//! # Modules
//!
//! - `backend`: Key-value trait abstraction and the in-memory backend
//! - `json`: JSON file backend with atomic writes
//! - `favorites`: Typed favorites list with change notifications
//! - `models`: Preference keys and change notifications

pub mod backend;
pub mod favorites;
pub mod json;
pub mod models;

pub use backend::{KeyValueStore, MemoryStore};
pub use favorites::FavoritesStore;
pub use json::JsonFileStore;
pub use models::{PreferenceChange, PreferenceKey, SubscriptionId};
