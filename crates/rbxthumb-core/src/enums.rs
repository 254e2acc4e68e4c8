use crate::errors::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Generation status of a thumbnail on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailState {
    Completed,
    InReview,
    Pending,
    Error,
    Moderated,
}

impl ThumbnailState {
    pub const ALL: [ThumbnailState; 5] = [
        ThumbnailState::Completed,
        ThumbnailState::InReview,
        ThumbnailState::Pending,
        ThumbnailState::Error,
        ThumbnailState::Moderated,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailState::Completed => "Completed",
            ThumbnailState::InReview => "InReview",
            ThumbnailState::Pending => "Pending",
            ThumbnailState::Error => "Error",
            ThumbnailState::Moderated => "Moderated",
        }
    }
}

impl FromStr for ThumbnailState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Completed" => Ok(ThumbnailState::Completed),
            "InReview" => Ok(ThumbnailState::InReview),
            "Pending" => Ok(ThumbnailState::Pending),
            "Error" => Ok(ThumbnailState::Error),
            "Moderated" => Ok(ThumbnailState::Moderated),
            other => Err(CoreError::InvalidWireValue {
                kind: "thumbnail state",
                value: other.to_string(),
            }),
        }
    }
}

/// What the server should hand back when no finished thumbnail exists yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailReturnPolicy {
    PlaceHolder,
    AutoGenerated,
    ForceAutoGenerated,
}

impl ThumbnailReturnPolicy {
    pub const ALL: [ThumbnailReturnPolicy; 3] = [
        ThumbnailReturnPolicy::PlaceHolder,
        ThumbnailReturnPolicy::AutoGenerated,
        ThumbnailReturnPolicy::ForceAutoGenerated,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailReturnPolicy::PlaceHolder => "PlaceHolder",
            ThumbnailReturnPolicy::AutoGenerated => "AutoGenerated",
            ThumbnailReturnPolicy::ForceAutoGenerated => "ForceAutoGenerated",
        }
    }
}

impl FromStr for ThumbnailReturnPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PlaceHolder" => Ok(ThumbnailReturnPolicy::PlaceHolder),
            "AutoGenerated" => Ok(ThumbnailReturnPolicy::AutoGenerated),
            "ForceAutoGenerated" => Ok(ThumbnailReturnPolicy::ForceAutoGenerated),
            other => Err(CoreError::InvalidWireValue {
                kind: "return policy",
                value: other.to_string(),
            }),
        }
    }
}

/// Image encoding of a thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailFormat {
    Png,
    Jpeg,
}

impl ThumbnailFormat {
    pub const ALL: [ThumbnailFormat; 2] = [ThumbnailFormat::Png, ThumbnailFormat::Jpeg];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailFormat::Png => "Png",
            ThumbnailFormat::Jpeg => "Jpeg",
        }
    }
}

impl FromStr for ThumbnailFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Png" => Ok(ThumbnailFormat::Png),
            "Jpeg" => Ok(ThumbnailFormat::Jpeg),
            other => Err(CoreError::InvalidWireValue {
                kind: "thumbnail format",
                value: other.to_string(),
            }),
        }
    }
}

// The three wire enums share Display and serde plumbing through their tables.
macro_rules! wire_string_impls {
    ($($ty:ty),+) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    )+};
}

wire_string_impls!(ThumbnailState, ThumbnailReturnPolicy, ThumbnailFormat);

/// Avatar rendering variant. Selects the endpoint, never sent as a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarThumbnailType {
    FullBody,
    Headshot,
    Bust,
}

impl AvatarThumbnailType {
    /// Numeric code used by callers that carry the type as an integer
    pub fn code(&self) -> u8 {
        match self {
            AvatarThumbnailType::FullBody => 1,
            AvatarThumbnailType::Headshot => 2,
            AvatarThumbnailType::Bust => 3,
        }
    }

    /// Path segment under `v1/users/`
    pub fn endpoint(&self) -> &'static str {
        match self {
            AvatarThumbnailType::FullBody => "avatar",
            AvatarThumbnailType::Bust => "avatar-bust",
            AvatarThumbnailType::Headshot => "avatar-headshot",
        }
    }

    /// Size requested when the caller leaves it unset
    pub fn default_size(&self) -> &'static str {
        match self {
            AvatarThumbnailType::FullBody => "30x30",
            AvatarThumbnailType::Bust | AvatarThumbnailType::Headshot => "48x48",
        }
    }
}

impl TryFrom<u8> for AvatarThumbnailType {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(AvatarThumbnailType::FullBody),
            2 => Ok(AvatarThumbnailType::Headshot),
            3 => Ok(AvatarThumbnailType::Bust),
            other => Err(CoreError::InvalidArgument(format!(
                "avatar type {} is invalid",
                other
            ))),
        }
    }
}

impl FromStr for AvatarThumbnailType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "full-body" | "fullbody" => Ok(AvatarThumbnailType::FullBody),
            "headshot" => Ok(AvatarThumbnailType::Headshot),
            "bust" => Ok(AvatarThumbnailType::Bust),
            _ => Err(CoreError::InvalidArgument(format!(
                "avatar type '{}' is invalid",
                s
            ))),
        }
    }
}

impl fmt::Display for AvatarThumbnailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AvatarThumbnailType::FullBody => "full-body",
            AvatarThumbnailType::Headshot => "headshot",
            AvatarThumbnailType::Bust => "bust",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_round_trip() {
        for state in ThumbnailState::ALL {
            assert_eq!(state.as_str().parse::<ThumbnailState>().unwrap(), state);
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(serde_json::from_str::<ThumbnailState>(&json).unwrap(), state);
        }
        for policy in ThumbnailReturnPolicy::ALL {
            assert_eq!(
                policy.as_str().parse::<ThumbnailReturnPolicy>().unwrap(),
                policy
            );
        }
        for format in ThumbnailFormat::ALL {
            assert_eq!(format.as_str().parse::<ThumbnailFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_unknown_wire_value_rejected() {
        let err = "Blocked".parse::<ThumbnailState>().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidWireValue {
                kind: "thumbnail state",
                value: "Blocked".to_string()
            }
        );
        // Wire strings are case sensitive
        assert!("completed".parse::<ThumbnailState>().is_err());
        assert!("Gif".parse::<ThumbnailFormat>().is_err());
        assert!(serde_json::from_str::<ThumbnailReturnPolicy>("\"Whatever\"").is_err());
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(ThumbnailState::InReview.to_string(), "InReview");
        assert_eq!(
            ThumbnailReturnPolicy::ForceAutoGenerated.as_str(),
            "ForceAutoGenerated"
        );
        assert_eq!(ThumbnailFormat::Jpeg.as_str(), "Jpeg");
    }

    #[test]
    fn test_avatar_type_codes() {
        for avatar_type in [
            AvatarThumbnailType::FullBody,
            AvatarThumbnailType::Headshot,
            AvatarThumbnailType::Bust,
        ] {
            assert_eq!(
                AvatarThumbnailType::try_from(avatar_type.code()).unwrap(),
                avatar_type
            );
            assert_eq!(
                avatar_type.to_string().parse::<AvatarThumbnailType>().unwrap(),
                avatar_type
            );
        }

        assert!(matches!(
            AvatarThumbnailType::try_from(0),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            AvatarThumbnailType::try_from(4),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            "torso".parse::<AvatarThumbnailType>(),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_avatar_endpoints_and_default_sizes() {
        assert_eq!(AvatarThumbnailType::FullBody.endpoint(), "avatar");
        assert_eq!(AvatarThumbnailType::Bust.endpoint(), "avatar-bust");
        assert_eq!(AvatarThumbnailType::Headshot.endpoint(), "avatar-headshot");

        assert_eq!(AvatarThumbnailType::FullBody.default_size(), "30x30");
        assert_eq!(AvatarThumbnailType::Bust.default_size(), "48x48");
        assert_eq!(AvatarThumbnailType::Headshot.default_size(), "48x48");
    }
}
