use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::info;

use super::element_text;
use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::slug::clean_text;

static REVIEW_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.row.review_table_row").unwrap());
static REVIEW_TEXT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.the_review").unwrap());

/// Cleaned text of every critic review on the page. Rows without a review
/// body are skipped; reviews that clean down to nothing are kept as `""`.
pub fn parse_reviews(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&REVIEW_ROW)
        .filter_map(|row| row.select(&REVIEW_TEXT).next())
        .map(|review| clean_text(&element_text(review)))
        .collect()
}

/// First page of critic reviews only.
pub async fn movie_reviews(fetcher: &Fetcher, movie: &str) -> Result<Vec<String>, FetchError> {
    let page = fetcher.fetch_reviews_page(movie).await?;
    let reviews = parse_reviews(&page.html);
    info!(movie, url = %page.url, reviews = reviews.len(), "Parsed reviews");
    Ok(reviews)
}
