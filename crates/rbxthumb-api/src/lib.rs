//! # rbxthumb API
//!
//! HTTP client for the Roblox thumbnails API.
//! This crate turns typed thumbnail requests into GETs against
//! `thumbnails.roblox.com` and decodes the responses into the value
//! types from `rbxthumb-core`.

pub mod client;
pub mod errors;
pub mod query;
pub mod sdk;
pub mod thumbnails;
pub mod urls;

// Re-export common types for convenience
pub use client::*;
pub use errors::*;
pub use sdk::*;
pub use thumbnails::*;
pub use urls::*;

// Re-export core types that API consumers will need
pub use rbxthumb_core::{
    AvatarThumbnailType, CoreError, Thumbnail, ThumbnailFormat, ThumbnailOptions,
    ThumbnailReturnPolicy, ThumbnailSize, ThumbnailState, UniverseThumbnail,
    UniverseThumbnailOptions,
};
