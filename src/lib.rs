#![forbid(unsafe_code)]

//! Light/dark theme synchronization and the application bootstrap around it.
//!
//! The `ThemeSynchronizer` keeps one mode consistent across in-memory state,
//! a durable key-value store and the document root's marker classes.

pub mod app;
pub mod config;
pub mod constants;
pub mod store;
pub mod surface;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{App, PluginMode, RenderContext, ThemeHandle};
pub use config::AppConfig;
pub use store::{DurableStore, FileStore, MemoryStore};
pub use surface::{PresentationSurface, RootClasses};
pub use theme::{ThemeMode, ThemeState, ThemeSynchronizer};
