/// Preview loading for gallery tiles
///
/// Each tile gets a primary locator and an alternate one. Loading tries the
/// primary, then the alternate, and gives up after that; the tile then shows
/// its "unavailable" placeholder. Every attempt is bounded by a timeout.
use std::sync::Arc;
use std::time::Duration;

use iced::widget::image::Handle;
use image::imageops::FilterType;
use image::RgbaImage;

use crate::error::{GalleryError, Result};
use crate::media::kind::MediaKind;
use crate::media::uri::Gateway;
use crate::state::data::ArtRecord;

/// Which URLs to try for a tile's preview image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPlan {
    pub primary: Option<String>,
    pub fallback: Option<String>,
    /// Show bytes as delivered instead of decoding and resizing
    pub animated: bool,
}

impl PreviewPlan {
    /// Build the locator chain for `record` rendered as `kind`.
    ///
    /// Videos preview their display image, then their thumbnail. Directories
    /// use the display image as backdrop. Everything else prefers the first
    /// rendition, then the display image. The alternate chain is display,
    /// thumbnail, first rendition, skipped when it equals the primary.
    pub fn for_record(record: &ArtRecord, kind: MediaKind, gateway: &Gateway) -> Self {
        let display = record.display_uri.as_deref();
        let thumbnail = record.thumbnail_uri.as_deref();
        let rendition = record.primary_uri();

        let primary = match kind {
            MediaKind::Video => gateway.resolve_first([display, thumbnail]),
            MediaKind::EmbeddedDocument => gateway.resolve(display),
            _ => gateway.resolve_first([rendition, display]),
        };
        let fallback = gateway
            .resolve_first([display, thumbnail, rendition])
            .filter(|url| primary.as_ref() != Some(url));

        Self {
            primary,
            fallback,
            animated: matches!(kind, MediaKind::Image { animated: true }),
        }
    }

    /// Locators in the order they are tried
    pub fn attempts(&self) -> impl Iterator<Item = &str> {
        self.primary.iter().chain(self.fallback.iter()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.fallback.is_none()
    }
}

/// Fetches and decodes preview images from the gateway
#[derive(Debug, Clone)]
pub struct PreviewLoader {
    http: reqwest::Client,
    timeout: Duration,
    max_edge: u32,
}

impl PreviewLoader {
    pub fn new(http: reqwest::Client, timeout: Duration, max_edge: u32) -> Self {
        Self {
            http,
            timeout,
            max_edge,
        }
    }

    /// Load the first locator in `plan` that downloads and decodes in time
    pub async fn load(self, plan: PreviewPlan) -> std::result::Result<Handle, Arc<GalleryError>> {
        let mut last_error = GalleryError::NoPreview;
        for url in plan.attempts() {
            match self.load_one(url, plan.animated).await {
                Ok(handle) => return Ok(handle),
                Err(err) => {
                    tracing::debug!(%url, error = %err, "preview attempt failed");
                    last_error = err;
                }
            }
        }
        tracing::warn!(error = %last_error, "⚠️  Preview unavailable");
        Err(Arc::new(last_error))
    }

    async fn load_one(&self, url: &str, animated: bool) -> Result<Handle> {
        let bytes = tokio::time::timeout(self.timeout, self.fetch(url))
            .await
            .map_err(|_| GalleryError::Timeout {
                url: url.to_string(),
                after: self.timeout,
            })??;

        if animated {
            // Skip the resize and let iced decode the bytes as delivered
            return Ok(Handle::from_bytes(bytes));
        }

        let max_edge = self.max_edge;
        let owned_url = url.to_string();
        tokio::task::spawn_blocking(move || -> Result<Handle> {
            let image = decode_fitted(&bytes, max_edge).map_err(|source| GalleryError::Image {
                url: owned_url,
                source,
            })?;
            let (width, height) = image.dimensions();
            Ok(Handle::from_rgba(width, height, image.into_raw()))
        })
        .await?
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Decode `bytes` and shrink the result to fit inside `max_edge` squared.
/// Images already small enough keep their size.
pub fn decode_fitted(bytes: &[u8], max_edge: u32) -> std::result::Result<RgbaImage, image::ImageError> {
    let image = image::load_from_memory(bytes)?;
    let image = if image.width() > max_edge || image.height() > max_edge {
        image.resize(max_edge, max_edge, FilterType::Lanczos3)
    } else {
        image
    };
    Ok(image.to_rgba8())
}
