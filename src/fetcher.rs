use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::Settings;
use crate::error::FetchError;
use crate::slug::slugify;

/// Raw markup together with the URL it came from.
#[derive(Debug)]
pub struct Page {
    pub url: String,
    pub html: String,
}

/// Single-shot GETs against the review site. No retries, no caching.
pub struct Fetcher {
    client: Client,
    base_url: String,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(ua) = &settings.user_agent {
            builder = builder.user_agent(ua.as_str());
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Fetcher {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn actor_url(&self, actor: &str) -> String {
        format!("{}/celebrity/{}", self.base_url, slugify(actor))
    }

    pub fn reviews_url(&self, movie: &str) -> String {
        format!("{}/m/{}/reviews", self.base_url, slugify(movie))
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");
        let network = |source: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(network)?;
        debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }

    pub async fn fetch_actor_page(&self, actor: &str) -> Result<Page, FetchError> {
        let url = self.actor_url(actor);
        let html = self.fetch(&url).await?;
        Ok(Page { url, html })
    }

    pub async fn fetch_reviews_page(&self, movie: &str) -> Result<Page, FetchError> {
        let url = self.reviews_url(movie);
        let html = self.fetch(&url).await?;
        Ok(Page { url, html })
    }
}
