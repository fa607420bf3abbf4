//! Plugboard Client Library
//!
//! Typed Rust bindings for the Plugboard plugin-management REST backend.
//!
//! # Architecture
//!
//! This crate is the client half of a split frontend/backend plugin manager:
//! the backend owns every plugin record and all lifecycle state, and this
//! library only transports those records over HTTP. There is no caching, no
//! retrying, and no local state — each call is one request.
//!
//! # Core Features
//!
//! ## Plugin Operations (`client` module)
//! - `list_plugins()` / `search_plugins()` - Installed-plugin listing and keyword search
//! - `list_market_plugins()` - Remote marketplace registry listing
//! - `install_plugin()` / `uninstall_plugin()` - Install lifecycle
//! - `load_plugin()` / `unload_plugin()` / `reload_plugin()` - Runtime lifecycle
//! - `toggle_plugin()` / `save_plugin()` - Enabled flag and configuration updates
//!
//! ## Data Structures (`plugin` module)
//! - `Plugin` - Backend plugin record (name, id, title, version, flags)
//! - `PluginItem` - `Plugin` plus frontend configuration fields
//! - `MarketItem` - Marketplace registry entry
//! - `PluginMeta` / `MetaField` - Manifest metadata and its three-state slot
//! - `PluginConfig` / `ConfigValue` - Loosely typed option values
//! - `PluginPatch` - Partial update payload for saves

pub mod client;
pub mod error;
pub mod plugin;

pub use client::PluginApi;
pub use error::{Error, Result};
pub use plugin::{
    Author, AuthorField, ConfigValue, MarketItem, MetaField, MetaMarker, Plugin, PluginConfig,
    PluginItem, PluginMeta, PluginPatch, PluginUrls,
};
