use crate::client::HttpTransport;
use crate::errors::{ApiError, Result};
use crate::query::QueryParams;
use crate::urls::UrlGenerator;
use log::{debug, error, info};
use rbxthumb_core::{
    AvatarThumbnailType, CoreError, Thumbnail, ThumbnailOptions, UniverseThumbnail,
    UniverseThumbnailOptions,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

const SERVICE: &str = "thumbnails";

/// Shape of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Envelope {
    /// `{"data": [...]}`
    Data,
    /// The object itself
    Bare,
}

/// Requests thumbnails and icons from the thumbnails API.
///
/// Stateless apart from the shared transport and URL generator, so it is
/// cheap to clone and safe to use from many tasks at once.
#[derive(Debug, Clone)]
pub struct ThumbnailProvider {
    transport: Arc<dyn HttpTransport>,
    urls: UrlGenerator,
}

impl ThumbnailProvider {
    pub fn new(transport: Arc<dyn HttpTransport>, urls: UrlGenerator) -> Self {
        Self { transport, urls }
    }

    /// GET `path`, unwrap the envelope and decode the payload
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
        envelope: Envelope,
    ) -> Result<T> {
        let url = self.urls.get_url(SERVICE, path);
        debug!("Fetching {} ({} query parameters)", url, query.len());

        let body = self.transport.get(&url, query.as_pairs()).await?;

        let payload = match envelope {
            Envelope::Bare => body,
            Envelope::Data => match body {
                Value::Object(mut map) => map.remove("data").ok_or_else(|| {
                    error!("Response from {} has no data field", path);
                    ApiError::MalformedResponse(format!(
                        "response from {} is missing the data field",
                        path
                    ))
                })?,
                _ => {
                    error!("Response from {} is not a JSON object", path);
                    return Err(ApiError::MalformedResponse(format!(
                        "response from {} is not a JSON object",
                        path
                    )));
                }
            },
        };

        serde_json::from_value(payload).map_err(|e| {
            error!("Failed to decode response from {}: {}", path, e);
            ApiError::MalformedResponse(format!("failed to decode response from {}: {}", path, e))
        })
    }

    /// Shared body of the id-list endpoints
    async fn fetch_batch(
        &self,
        path: &str,
        id_key: &'static str,
        ids: &[u64],
        options: &ThumbnailOptions,
        with_policy: bool,
    ) -> Result<Vec<Thumbnail>> {
        let mut query = QueryParams::new();
        query.push_ids(id_key, ids).push_options(options, with_policy);

        let thumbnails: Vec<Thumbnail> = self.fetch(path, &query, Envelope::Data).await?;
        info!(
            "Fetched {} thumbnails from {} for {} ids",
            thumbnails.len(),
            path,
            ids.len()
        );

        Ok(thumbnails)
    }

    /// Thumbnails for assets. Accepts a return policy.
    pub async fn get_asset_thumbnails(
        &self,
        asset_ids: &[u64],
        options: &ThumbnailOptions,
    ) -> Result<Vec<Thumbnail>> {
        self.fetch_batch("v1/assets", "assetIds", asset_ids, options, true)
            .await
    }

    /// 3D thumbnail for one asset. The endpoint answers with a bare object.
    pub async fn get_asset_thumbnail_3d(&self, asset_id: u64) -> Result<Thumbnail> {
        let mut query = QueryParams::new();
        query.push("assetId", asset_id);

        self.fetch("v1/assets-thumbnail-3d", &query, Envelope::Bare)
            .await
    }

    pub async fn get_badge_icons(
        &self,
        badge_ids: &[u64],
        options: &ThumbnailOptions,
    ) -> Result<Vec<Thumbnail>> {
        self.fetch_batch("v1/badges/icons", "badgeIds", badge_ids, options, false)
            .await
    }

    pub async fn get_bundle_thumbnails(
        &self,
        bundle_ids: &[u64],
        options: &ThumbnailOptions,
    ) -> Result<Vec<Thumbnail>> {
        self.fetch_batch(
            "v1/bundles/thumbnails",
            "bundleIds",
            bundle_ids,
            options,
            false,
        )
        .await
    }

    pub async fn get_gamepass_icons(
        &self,
        gamepass_ids: &[u64],
        options: &ThumbnailOptions,
    ) -> Result<Vec<Thumbnail>> {
        self.fetch_batch("v1/game-passes", "gamePassIds", gamepass_ids, options, false)
            .await
    }

    /// Icons for universes. Accepts a return policy.
    pub async fn get_universe_icons(
        &self,
        universe_ids: &[u64],
        options: &ThumbnailOptions,
    ) -> Result<Vec<Thumbnail>> {
        self.fetch_batch("v1/games/icons", "universeIds", universe_ids, options, true)
            .await
    }

    /// Thumbnails of several universes at once, grouped per universe
    pub async fn get_universe_thumbnails(
        &self,
        universe_ids: &[u64],
        options: &UniverseThumbnailOptions,
    ) -> Result<Vec<UniverseThumbnail>> {
        let path = "v1/games/multiget/thumbnails";
        let mut query = QueryParams::new();
        query
            .push_ids("universeIds", universe_ids)
            .push_universe_options(options);

        let universes: Vec<UniverseThumbnail> = self.fetch(path, &query, Envelope::Data).await?;
        info!(
            "Fetched thumbnails for {} universes from {}",
            universes.len(),
            path
        );

        Ok(universes)
    }

    pub async fn get_group_icons(
        &self,
        group_ids: &[u64],
        options: &ThumbnailOptions,
    ) -> Result<Vec<Thumbnail>> {
        self.fetch_batch("v1/groups/icons", "groupIds", group_ids, options, false)
            .await
    }

    /// Icons for places. Accepts a return policy.
    pub async fn get_place_icons(
        &self,
        place_ids: &[u64],
        options: &ThumbnailOptions,
    ) -> Result<Vec<Thumbnail>> {
        self.fetch_batch("v1/places/gameicons", "placeIds", place_ids, options, true)
            .await
    }

    /// Avatar renders for users.
    ///
    /// `avatar_type` is an [`AvatarThumbnailType`] or its integer code. An
    /// unknown code fails with an invalid-argument error before anything is
    /// sent. Without an explicit size, full-body renders default to `30x30`
    /// and bust/headshot renders to `48x48`.
    pub async fn get_user_avatars<T>(
        &self,
        user_ids: &[u64],
        avatar_type: T,
        options: &ThumbnailOptions,
    ) -> Result<Vec<Thumbnail>>
    where
        T: TryInto<AvatarThumbnailType>,
        CoreError: From<T::Error>,
    {
        let avatar_type = avatar_type.try_into().map_err(CoreError::from)?;
        debug!("Fetching {} avatars for {} users", avatar_type, user_ids.len());

        let path = format!("v1/users/{}", avatar_type.endpoint());
        let mut query = QueryParams::new();
        query.push_ids("userIds", user_ids);
        match options.size {
            Some(size) => query.push("size", size),
            None => query.push("size", avatar_type.default_size()),
        };
        query
            .push_opt("format", options.format)
            .push_opt("isCircular", options.is_circular);

        let thumbnails: Vec<Thumbnail> = self.fetch(&path, &query, Envelope::Data).await?;
        info!(
            "Fetched {} avatar thumbnails from {}",
            thumbnails.len(),
            path
        );

        Ok(thumbnails)
    }

    /// 3D avatar for one user. The endpoint answers with a bare object.
    pub async fn get_user_avatar_3d(&self, user_id: u64) -> Result<Thumbnail> {
        let mut query = QueryParams::new();
        query.push("userId", user_id);

        self.fetch("v1/users/avatar-3d", &query, Envelope::Bare)
            .await
    }
}
