//! # Claudia Core
//!
//! The foundational layer shared by the appearance and settings services:
//! change notification, key-value persistence, the presentation context
//! that visual state is published to, and application configuration.

pub mod config;
pub mod event;
pub mod presentation;
pub mod store;

pub use config::{AppConfig, ConfigError, LogLevel};
pub use event::{Event, EventEmitter, Subscription};
pub use presentation::{PresentationContext, StyleScope};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
