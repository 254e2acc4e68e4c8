use crate::errors::{ApiError, Result};
use log::debug;
use url::Url;

pub const DEFAULT_BASE_DOMAIN: &str = "roblox.com";

/// Builds endpoint URLs of the form `https://{service}.{base_domain}/{path}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlGenerator {
    base_domain: String,
}

impl UrlGenerator {
    /// Create a generator for a custom base domain (e.g. a proxy such as `roproxy.com`)
    pub fn new(base_domain: impl Into<String>) -> Result<Self> {
        let base_domain: String = base_domain.into();
        let base_domain = base_domain
            .trim()
            .trim_end_matches('/')
            .to_lowercase();

        let parsed = Url::parse(&format!("https://{}/", base_domain))
            .map_err(|e| ApiError::Config(format!("invalid base domain '{}': {}", base_domain, e)))?;

        // Only a bare host name is accepted
        if base_domain.is_empty()
            || parsed.host_str() != Some(base_domain.as_str())
            || parsed.port().is_some()
        {
            return Err(ApiError::Config(format!(
                "invalid base domain '{}': expected a bare host name",
                base_domain
            )));
        }

        debug!("Using base domain: {}", base_domain);
        Ok(Self { base_domain })
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Full URL for `path` on the given service subdomain
    pub fn get_url(&self, service: &str, path: &str) -> String {
        format!(
            "https://{}.{}/{}",
            service,
            self.base_domain,
            path.trim_start_matches('/')
        )
    }
}

impl Default for UrlGenerator {
    fn default() -> Self {
        Self {
            base_domain: DEFAULT_BASE_DOMAIN.to_string(),
        }
    }
}
