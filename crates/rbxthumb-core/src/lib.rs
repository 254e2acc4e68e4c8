//! # rbxthumb core
//!
//! Domain types for the Roblox thumbnails API.
//!
//! This crate has no I/O dependencies:
//! - Wire enumerations with explicit string tables
//! - Thumbnail value objects
//! - Request option types
//! - Error definitions

pub mod enums;
pub mod errors;
pub mod models;
pub mod options;

// Re-export commonly used types
pub use enums::{AvatarThumbnailType, ThumbnailFormat, ThumbnailReturnPolicy, ThumbnailState};
pub use errors::{CoreError, Result};
pub use models::{Thumbnail, UniverseThumbnail};
pub use options::{ThumbnailOptions, ThumbnailSize, UniverseThumbnailOptions};
