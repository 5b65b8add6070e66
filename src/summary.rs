use serde::Serialize;
use tracing::info;

use crate::error::SummaryError;
use crate::fetcher::Fetcher;
use crate::parser::filmography::{actor_filmography, FilmographyRow};
use crate::sentiment::{round2, titles_sentiment, Lexicon, ReviewSentiment};

const NO_SCORE: &str = "no score yet";

/// One aggregate row per actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorSummary {
    pub actor: String,
    pub total_movies: usize,
    pub movies_not_scored: usize,
    pub avg_rating: f64,
    /// Whole dollars.
    pub total_box_office: u64,
    pub avg_review_sentiment: ReviewSentiment,
    pub movies_per_year: f64,
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Unscored,
    Score(u64),
}

/// `"No Score Yet"` (any case) is unscored; otherwise the first run of digits.
///
/// `None` when there are no digits, or when the digit run does not fit in a `u64`.
pub fn parse_rating(raw: &str) -> Option<Rating> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(NO_SCORE) {
        return Some(Rating::Unscored);
    }
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok().map(Rating::Score)
}

/// Dollar amount of a box-office cell such as `"$12.3M"`, `"500K"` or `"$1,234"`.
///
/// A cell with no digits at all is missing and yields `Some(0)`.
/// `None` means the cell has digits but is malformed.
pub fn parse_box_office(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if !raw.bytes().any(|b| b.is_ascii_digit()) {
        return Some(0);
    }

    let compact: String = raw
        .chars()
        .filter(|&c| c != '$' && c != ',' && !c.is_whitespace())
        .collect();
    let (number, scale) = match compact.chars().last()? {
        'K' | 'k' => (&compact[..compact.len() - 1], 1_000),
        'M' | 'm' => (&compact[..compact.len() - 1], 1_000_000),
        'B' | 'b' => (&compact[..compact.len() - 1], 1_000_000_000),
        _ => (compact.as_str(), 1),
    };
    scaled_amount(number, scale)
}

/// Exact `number * scale` for a plain decimal string, truncating sub-dollar remainders.
fn scaled_amount(number: &str, scale: u64) -> Option<u64> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return None;
    }

    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_value: u64 = if frac.is_empty() { 0 } else { frac.parse().ok()? };
    let divisor = 10u64.checked_pow(u32::try_from(frac.len()).ok()?)?;

    whole
        .checked_mul(scale)?
        .checked_add(frac_value.checked_mul(scale)? / divisor)
}

/// Aggregate a scraped filmography. Rows with an empty year are ignored.
pub fn summarize(
    actor: &str,
    rows: &[FilmographyRow],
    sentiment: ReviewSentiment,
) -> Result<ActorSummary, SummaryError> {
    let dated: Vec<&FilmographyRow> = rows.iter().filter(|r| !r.year.trim().is_empty()).collect();

    let mut not_scored = 0usize;
    let mut rating_sum = 0u64;
    let mut rated = 0usize;
    let mut box_office = 0u64;
    let mut years = Vec::with_capacity(dated.len());

    for row in &dated {
        match parse_rating(&row.rating) {
            Some(Rating::Unscored) => not_scored += 1,
            Some(Rating::Score(score)) => {
                rating_sum = rating_sum.saturating_add(score);
                rated += 1;
            }
            None => {
                return Err(SummaryError::InvalidRating {
                    title: row.title.clone(),
                    value: row.rating.clone(),
                })
            }
        }

        let dollars =
            parse_box_office(&row.box_office).ok_or_else(|| SummaryError::InvalidBoxOffice {
                title: row.title.clone(),
                value: row.box_office.clone(),
            })?;
        box_office = box_office.saturating_add(dollars);

        let year: i32 = row.year.trim().parse().map_err(|_| SummaryError::InvalidYear {
            title: row.title.clone(),
            value: row.year.clone(),
        })?;
        years.push(year);
    }

    let (Some(&start_year), Some(&end_year)) = (years.iter().min(), years.iter().max()) else {
        return Err(SummaryError::NoDatedMovies {
            actor: actor.to_string(),
        });
    };

    let avg_rating = if rated > 0 {
        round2(rating_sum as f64 / rated as f64)
    } else {
        0.0
    };
    let span = i64::from(end_year) - i64::from(start_year) + 1;

    Ok(ActorSummary {
        actor: actor.to_string(),
        total_movies: dated.len(),
        movies_not_scored: not_scored,
        avg_rating,
        total_box_office: box_office,
        avg_review_sentiment: sentiment,
        movies_per_year: dated.len() as f64 / span as f64,
        start_year,
        end_year,
    })
}

/// Full pipeline for one actor: filmography, numeric aggregation, then review
/// sentiment over every title in the filmography.
pub async fn actor_summary(
    fetcher: &Fetcher,
    lexicon: &Lexicon,
    actor: &str,
) -> Result<ActorSummary, SummaryError> {
    let rows = actor_filmography(fetcher, actor).await?;
    // Bad numbers fail here, before the per-title review fetches.
    let mut summary = summarize(actor, &rows, ReviewSentiment::NA)?;

    let titles: Vec<String> = rows.into_iter().map(|r| r.title).collect();
    summary.avg_review_sentiment = titles_sentiment(fetcher, lexicon, &titles).await?;

    info!(
        actor,
        movies = summary.total_movies,
        sentiment = %summary.avg_review_sentiment,
        "Built actor summary"
    );
    Ok(summary)
}
