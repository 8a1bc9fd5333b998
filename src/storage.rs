pub mod events;
pub mod file;
pub mod keys;
pub mod postgres;
pub mod service;

pub use events::{NotificationVariant, SyncEvent};
pub use keys::StorageKey;
pub use service::StorageService;
