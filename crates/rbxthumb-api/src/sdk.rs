use crate::client::{ApiConfig, HttpTransport, ReqwestTransport};
use crate::errors::{ApiError, Result};
use crate::thumbnails::ThumbnailProvider;
use crate::urls::UrlGenerator;
use log::debug;
use std::sync::Arc;

/// Main SDK entry point. Owns the shared transport and URL generator and
/// hands out providers that borrow them.
#[derive(Debug, Clone)]
pub struct RobloxClient {
    transport: Arc<dyn HttpTransport>,
    urls: UrlGenerator,
}

impl RobloxClient {
    /// Client for `roblox.com` with the default reqwest transport
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(
            Arc::new(ReqwestTransport::new()?),
            UrlGenerator::default(),
        ))
    }

    /// Client over a caller-supplied transport
    pub fn with_transport(transport: Arc<dyn HttpTransport>, urls: UrlGenerator) -> Self {
        Self { transport, urls }
    }

    /// Create from any configuration implementing ApiConfig trait
    pub fn from_config<C>(config: &C) -> std::result::Result<Self, C::Error>
    where
        C: ApiConfig,
        C::Error: From<ApiError>,
    {
        let urls = match config.get_base_domain()? {
            Some(domain) => {
                debug!("Got custom base domain from config: {}", domain);
                UrlGenerator::new(domain)?
            }
            None => {
                debug!("Using default base domain");
                UrlGenerator::default()
            }
        };
        let transport = ReqwestTransport::from_config(config)?;

        Ok(Self::with_transport(Arc::new(transport), urls))
    }

    pub fn urls(&self) -> &UrlGenerator {
        &self.urls
    }

    /// Thumbnail endpoints
    pub fn thumbnails(&self) -> ThumbnailProvider {
        ThumbnailProvider::new(self.transport.clone(), self.urls.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DomainConfig(Option<String>);

    impl ApiConfig for DomainConfig {
        type Error = ApiError;

        fn get_base_domain(&self) -> std::result::Result<Option<String>, Self::Error> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_from_config_base_domain() {
        let client = RobloxClient::from_config(&DomainConfig(None)).unwrap();
        assert_eq!(client.urls().base_domain(), "roblox.com");

        let client = RobloxClient::from_config(&DomainConfig(Some("roproxy.com".into()))).unwrap();
        assert_eq!(client.urls().base_domain(), "roproxy.com");
    }

    #[test]
    fn test_from_config_rejects_bad_domain() {
        let err = RobloxClient::from_config(&DomainConfig(Some("roblox.com/v1".into()))).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
