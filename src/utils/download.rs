//! Startup fetcher for the decorative page background.
//!
//! The image is downloaded once, cached on disk and inlined into
//! the page as a base64 data URI.

use crate::error::{AppError, Result};
use crate::utils::config::BackgroundConfig;
use base64::Engine;
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use std::time::Duration;

const FALLBACK_MIME: &str = "image/gif";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    pub mime: String,
    pub data: String,
}

impl BackgroundImage {
    pub fn from_bytes(mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self { mime: mime.into(), data: base64::engine::general_purpose::STANDARD.encode(bytes) }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data)
    }

    pub fn css(&self) -> String {
        format!(
            "body {{ background-image: url('{}'); background-size: cover; }}",
            self.data_uri()
        )
    }
}

pub struct BackgroundDownloader;

impl BackgroundDownloader {
    /// Downloads the image and caches it at `config.cache_path`.
    pub async fn fetch(config: &BackgroundConfig) -> Result<BackgroundImage> {
        let client =
            reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        let response = client.get(&config.url).send().await?.error_for_status()?;

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::trim)
            .filter(|v| v.starts_with("image/") && v.chars().all(is_mime_char))
            .map(str::to_string)
            .unwrap_or_else(|| guess_mime(&config.url));

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::Generic(format!("empty background image from {}", config.url)));
        }

        if let Some(parent) = config.cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&config.cache_path, &bytes).await?;
        log::debug!(
            "Cached background image ({} bytes) at {}",
            bytes.len(),
            config.cache_path.display()
        );

        Ok(BackgroundImage::from_bytes(mime, &bytes))
    }

    pub async fn load_cached(path: &Path) -> Result<BackgroundImage> {
        let bytes = tokio::fs::read(path).await?;
        Ok(BackgroundImage::from_bytes(guess_mime(&path.to_string_lossy()), &bytes))
    }

    /// Fetches the background, falling back to the cached copy. Never fails.
    pub async fn resolve(config: &BackgroundConfig) -> Option<BackgroundImage> {
        if !config.enabled {
            log::info!("Background image disabled");
            return None;
        }

        match Self::fetch(config).await {
            Ok(image) => {
                log::info!("Background image downloaded from {}", config.url);
                return Some(image);
            }
            Err(e) => log::warn!("Failed to download background image: {}", e),
        }

        match Self::load_cached(&config.cache_path).await {
            Ok(image) => {
                log::info!("Using cached background image {}", config.cache_path.display());
                Some(image)
            }
            Err(e) => {
                log::warn!("No background image available: {}", e);
                None
            }
        }
    }
}

fn is_mime_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '+' | '-' | '.')
}

fn guess_mime(location: &str) -> String {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    let extension = path.rsplit('.').next().map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => FALLBACK_MIME,
    }
    .to_string()
}
