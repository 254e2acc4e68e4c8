use crate::enums::ThumbnailState;
use serde::{Deserialize, Serialize};

/// One rendered image resource as reported by the thumbnails API.
///
/// `image_url` is only meaningful once the server has finished rendering,
/// but the server may omit it in any state, so callers always get an
/// `Option`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub target_id: u64,
    pub state: ThumbnailState,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Thumbnail {
    /// True when the server finished rendering and handed back a URL
    pub fn is_ready(&self) -> bool {
        self.state == ThumbnailState::Completed && self.image_url.is_some()
    }
}

/// Thumbnails of one universe from the multiget endpoint
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UniverseThumbnail {
    pub universe_id: u64,
    #[serde(default)]
    pub error: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thumbnail_from_wire() {
        let thumbnail: Thumbnail = serde_json::from_value(json!({
            "targetId": 1,
            "state": "Completed",
            "imageUrl": "http://x/1.png"
        }))
        .unwrap();

        assert_eq!(thumbnail.target_id, 1);
        assert_eq!(thumbnail.state, ThumbnailState::Completed);
        assert_eq!(thumbnail.image_url.as_deref(), Some("http://x/1.png"));
        assert!(thumbnail.is_ready());
    }

    #[test]
    fn test_thumbnail_null_or_missing_image_url() {
        let null_url: Thumbnail = serde_json::from_value(json!({
            "targetId": 2,
            "state": "Pending",
            "imageUrl": null
        }))
        .unwrap();
        assert_eq!(null_url.image_url, None);
        assert!(!null_url.is_ready());

        let missing_url: Thumbnail =
            serde_json::from_value(json!({"targetId": 3, "state": "Completed"})).unwrap();
        assert_eq!(missing_url.image_url, None);
        assert!(!missing_url.is_ready());
    }

    #[test]
    fn test_thumbnail_rejects_bad_objects() {
        // Unknown state
        assert!(serde_json::from_value::<Thumbnail>(json!({
            "targetId": 1,
            "state": "Sparkling",
            "imageUrl": null
        }))
        .is_err());

        // Missing target id
        assert!(serde_json::from_value::<Thumbnail>(json!({
            "state": "Completed",
            "imageUrl": "u"
        }))
        .is_err());
    }

    #[test]
    fn test_universe_thumbnail_from_wire() {
        let universe: UniverseThumbnail = serde_json::from_value(json!({
            "universeId": 9,
            "error": null,
            "thumbnails": [
                {"targetId": 9, "state": "Completed", "imageUrl": "u"},
                {"targetId": 10, "state": "Moderated", "imageUrl": null}
            ]
        }))
        .unwrap();

        assert_eq!(universe.universe_id, 9);
        assert_eq!(universe.error, None);
        assert_eq!(universe.thumbnails.len(), 2);
        assert_eq!(universe.thumbnails[0].target_id, 9);
        assert_eq!(universe.thumbnails[1].state, ThumbnailState::Moderated);
    }

    #[test]
    fn test_universe_thumbnail_requires_thumbnails() {
        assert!(serde_json::from_value::<UniverseThumbnail>(json!({
            "universeId": 9,
            "error": "boom"
        }))
        .is_err());
    }
}
