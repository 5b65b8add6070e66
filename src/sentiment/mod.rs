pub mod lexicon;

use std::fmt;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::error::{FetchError, ScrapeError};
use crate::fetcher::Fetcher;
use crate::parser::filmography::actor_filmography;
use crate::parser::reviews::movie_reviews;
pub use lexicon::Lexicon;

/// Mean review polarity, or "NA" when no review was scored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReviewSentiment(Option<f64>);

impl ReviewSentiment {
    pub const NA: ReviewSentiment = ReviewSentiment(None);

    pub fn value(&self) -> Option<f64> {
        self.0
    }
}

impl fmt::Display for ReviewSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{:.2}", v),
            None => f.write_str("NA"),
        }
    }
}

impl Serialize for ReviewSentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value() {
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_str("NA"),
        }
    }
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Arithmetic mean rounded to 2 decimals; `NA` for an empty input.
pub fn mean_polarity(scores: impl IntoIterator<Item = f64>) -> ReviewSentiment {
    let (sum, count) = scores
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));
    if count == 0 {
        ReviewSentiment::NA
    } else {
        ReviewSentiment(Some(round2(sum / count as f64)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    pub text: String,
    pub polarity: f64,
}

/// Per-review polarity for every non-empty review, in page order.
pub fn score_each(lexicon: &Lexicon, reviews: &[String]) -> Vec<ScoredReview> {
    reviews
        .iter()
        .filter(|r| !r.is_empty())
        .map(|r| ScoredReview {
            text: r.clone(),
            polarity: lexicon.polarity(r),
        })
        .collect()
}

/// Score every non-empty review and average.
pub fn score_reviews(lexicon: &Lexicon, reviews: &[String]) -> ReviewSentiment {
    mean_polarity(
        reviews
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| lexicon.polarity(r)),
    )
}

/// Fetch the review page of each title in turn and average over all reviews.
/// A title without a review page contributes nothing.
pub async fn titles_sentiment(
    fetcher: &Fetcher,
    lexicon: &Lexicon,
    titles: &[String],
) -> Result<ReviewSentiment, FetchError> {
    let pb = ProgressBar::new(titles.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut reviews = Vec::new();
    for title in titles {
        pb.set_message(title.clone());
        match movie_reviews(fetcher, title).await {
            Ok(found) => {
                debug!(title = %title, reviews = found.len(), "collected reviews");
                reviews.extend(found);
            }
            Err(FetchError::NotFound { url }) => {
                warn!(title = %title, url = %url, "No review page, skipping");
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let sentiment = score_reviews(lexicon, &reviews);
    info!(
        titles = titles.len(),
        reviews = reviews.len(),
        sentiment = %sentiment,
        "Scored reviews"
    );
    Ok(sentiment)
}

/// Average review sentiment across an actor's whole filmography.
pub async fn actor_sentiment(
    fetcher: &Fetcher,
    lexicon: &Lexicon,
    actor: &str,
) -> Result<ReviewSentiment, ScrapeError> {
    let titles: Vec<String> = actor_filmography(fetcher, actor)
        .await?
        .into_iter()
        .map(|row| row.title)
        .collect();
    Ok(titles_sentiment(fetcher, lexicon, &titles).await?)
}
