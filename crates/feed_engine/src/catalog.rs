use std::time::Duration;

use feed_core::{CatalogKey, MediaRef};
use feed_logging::{feed_debug, feed_warn};
use futures_util::StreamExt;
use url::Url;

use crate::{decode_catalog, decode_media, FailureKind, FetchError};

/// Placeholder in [`CatalogSettings::media_path`] replaced by the catalog key.
const KEY_PLACEHOLDER: &str = "{key}";

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    /// Path of the listing endpoint, relative to `base_url`.
    pub list_path: String,
    /// Path template of the per-key media endpoint, relative to `base_url`.
    pub media_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://dog.ceo/api".to_string(),
            list_path: "breeds/list/all".to_string(),
            media_path: "breed/{key}/images".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Remote catalog as seen by the feed.
///
/// Neither operation fails: transport errors, non-success statuses and
/// malformed bodies all come back as an empty result.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Every catalog key, in response order.
    async fn list_keys(&self) -> Vec<CatalogKey>;

    /// All media known for `key`.
    async fn resolve_media(&self, key: &CatalogKey) -> Vec<MediaRef>;

    /// The representative media for `key`, or the placeholder.
    async fn resolve_first_media(&self, key: &CatalogKey) -> MediaRef {
        self.resolve_media(key)
            .await
            .into_iter()
            .next()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalogClient {
    settings: CatalogSettings,
    client: reqwest::Client,
}

impl ReqwestCatalogClient {
    pub fn new(settings: CatalogSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Fallible form of [`CatalogClient::list_keys`].
    pub async fn try_list_keys(&self) -> Result<Vec<CatalogKey>, FetchError> {
        let url = self.endpoint(&self.settings.list_path, None)?;
        let body = self.get(url).await?;
        Ok(decode_catalog(&body)?)
    }

    /// Fallible form of [`CatalogClient::resolve_media`].
    pub async fn try_resolve_media(&self, key: &CatalogKey) -> Result<Vec<MediaRef>, FetchError> {
        let url = self.endpoint(&self.settings.media_path, Some(key))?;
        let body = self.get(url).await?;
        Ok(decode_media(&body)?)
    }

    /// Joins a path template onto the base url, percent-encoding the key as
    /// a single segment.
    fn endpoint(&self, template: &str, key: Option<&CatalogKey>) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FetchError::new(FailureKind::InvalidUrl, "base url cannot carry a path")
            })?;
            segments.pop_if_empty();
            for part in template.split('/').filter(|part| !part.is_empty()) {
                match key {
                    Some(key) if part == KEY_PLACEHOLDER => {
                        segments.push(key.as_str());
                    }
                    _ => {
                        segments.push(part);
                    }
                }
            }
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        feed_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl CatalogClient for ReqwestCatalogClient {
    async fn list_keys(&self) -> Vec<CatalogKey> {
        match self.try_list_keys().await {
            Ok(keys) => keys,
            Err(err) => {
                feed_warn!("Catalog listing degraded to empty: {}", err);
                Vec::new()
            }
        }
    }

    async fn resolve_media(&self, key: &CatalogKey) -> Vec<MediaRef> {
        match self.try_resolve_media(key).await {
            Ok(media) => media,
            Err(err) => {
                feed_warn!("Media for {} degraded to empty: {}", key, err);
                Vec::new()
            }
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
