use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("page not found: {url}")]
    NotFound { url: String },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },
}

/// Failure to turn a page into structured rows.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("unexpected page structure at {url}: {reason}")]
    StructureChanged { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
    #[error("invalid rating {value:?} for {title:?}")]
    InvalidRating { title: String, value: String },
    #[error("invalid box office {value:?} for {title:?}")]
    InvalidBoxOffice { title: String, value: String },
    #[error("invalid year {value:?} for {title:?}")]
    InvalidYear { title: String, value: String },
    #[error("no dated movies in filmography of {actor}")]
    NoDatedMovies { actor: String },
}

impl From<FetchError> for SummaryError {
    fn from(e: FetchError) -> Self {
        SummaryError::Scrape(e.into())
    }
}
