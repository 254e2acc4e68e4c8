use crate::enums::{ThumbnailFormat, ThumbnailReturnPolicy};
use crate::errors::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Requested thumbnail dimensions, sent as `"{width}x{height}"`.
///
/// Each endpoint accepts its own fixed set of sizes and the server rejects
/// the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

impl ThumbnailSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square size, e.g. `150x150`
    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ThumbnailSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidArgument(format!("size '{}' is not WIDTHxHEIGHT", s));

        let (width, height) = s
            .trim()
            .split_once(|c: char| c.eq_ignore_ascii_case(&'x'))
            .ok_or_else(invalid)?;
        let width = width.parse::<u32>().map_err(|_| invalid())?;
        let height = height.parse::<u32>().map_err(|_| invalid())?;

        Ok(Self::new(width, height))
    }
}

impl Serialize for ThumbnailSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ThumbnailSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Formatting parameters shared by the batch endpoints.
///
/// Every field is optional; unset fields are left out of the request so the
/// server applies its own default. `return_policy` is only sent to endpoints
/// that accept it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailOptions {
    pub size: Option<ThumbnailSize>,
    pub format: Option<ThumbnailFormat>,
    pub is_circular: Option<bool>,
    pub return_policy: Option<ThumbnailReturnPolicy>,
}

impl ThumbnailOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: ThumbnailSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_format(mut self, format: ThumbnailFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_circular(mut self, is_circular: bool) -> Self {
        self.is_circular = Some(is_circular);
        self
    }

    pub fn with_return_policy(mut self, return_policy: ThumbnailReturnPolicy) -> Self {
        self.return_policy = Some(return_policy);
        self
    }
}

/// Parameters for the universe multiget endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniverseThumbnailOptions {
    pub size: Option<ThumbnailSize>,
    pub format: Option<ThumbnailFormat>,
    pub is_circular: Option<bool>,
    /// Caps how many thumbnails come back per universe
    pub count_per_universe: Option<u32>,
    /// Whether default images are included for universes without uploads
    pub defaults: Option<bool>,
}

impl UniverseThumbnailOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: ThumbnailSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_format(mut self, format: ThumbnailFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_circular(mut self, is_circular: bool) -> Self {
        self.is_circular = Some(is_circular);
        self
    }

    pub fn with_count_per_universe(mut self, count: u32) -> Self {
        self.count_per_universe = Some(count);
        self
    }

    pub fn with_defaults(mut self, defaults: bool) -> Self {
        self.defaults = Some(defaults);
        self
    }
}

impl From<ThumbnailOptions> for UniverseThumbnailOptions {
    fn from(options: ThumbnailOptions) -> Self {
        Self {
            size: options.size,
            format: options.format,
            is_circular: options.is_circular,
            ..Self::default()
        }
    }
}
