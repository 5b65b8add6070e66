use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, info};

use super::element_text;
use crate::error::ScrapeError;
use crate::fetcher::Fetcher;

static TBODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody.celebrity-filmography__tbody").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

pub const COLUMNS: [&str; 5] = ["RATING", "TITLE", "CREDIT", "BOX_OFFICE", "YEAR"];

/// One credit as scraped. All fields are the trimmed cell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilmographyRow {
    pub rating: String,
    pub title: String,
    pub credit: String,
    pub box_office: String,
    pub year: String,
}

impl FilmographyRow {
    fn from_cells(cells: Vec<String>) -> Option<Self> {
        let [rating, title, credit, box_office, year]: [String; 5] = cells.try_into().ok()?;
        Some(FilmographyRow {
            rating,
            title,
            credit,
            box_office,
            year,
        })
    }
}

/// Rows of the filmography table, in page order. Rows without exactly five
/// cells are dropped. `None` when the table itself is absent.
pub fn parse_filmography(html: &str) -> Option<Vec<FilmographyRow>> {
    let document = Html::parse_document(html);
    let tbody = document.select(&TBODY).next()?;

    let rows = tbody
        .select(&ROW)
        .filter_map(|tr| {
            let cells: Vec<String> = tr.select(&CELL).map(element_text).collect();
            let n = cells.len();
            let row = FilmographyRow::from_cells(cells);
            if row.is_none() {
                debug!(cells = n, "skipping filmography row");
            }
            row
        })
        .collect();
    Some(rows)
}

/// Fetch and parse an actor's filmography.
///
/// A 404 surfaces as `FetchError::NotFound`; a page without the table as
/// `ScrapeError::StructureChanged`. An existing but empty table is `Ok(vec![])`.
pub async fn actor_filmography(
    fetcher: &Fetcher,
    actor: &str,
) -> Result<Vec<FilmographyRow>, ScrapeError> {
    let page = fetcher.fetch_actor_page(actor).await?;
    let rows = parse_filmography(&page.html).ok_or_else(|| ScrapeError::StructureChanged {
        url: page.url.clone(),
        reason: "filmography table not found".to_string(),
    })?;
    info!(actor, url = %page.url, rows = rows.len(), "Parsed filmography");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetcher::tests::{local_fetcher, serve_once};

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    #[test]
    fn only_five_cell_rows_in_order() {
        let rows = parse_filmography(&fixture("filmography")).unwrap();
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Film A", "Film B", "Untitled Project", "Film C"]);
    }

    #[test]
    fn cell_text_is_trimmed() {
        let rows = parse_filmography(&fixture("filmography")).unwrap();
        assert_eq!(
            rows[0],
            FilmographyRow {
                rating: "8/10".into(),
                title: "Film A".into(),
                credit: "Actor".into(),
                box_office: "$12M".into(),
                year: "2001".into(),
            }
        );
        assert_eq!(rows[1].rating, "No Score Yet");
        assert_eq!(rows[1].box_office, "");
        assert_eq!(rows[2].year, "");
        assert_eq!(rows[2].credit, "Actor, Producer");
    }

    #[test]
    fn missing_table_is_none() {
        assert!(parse_filmography(&fixture("filmography_redesigned")).is_none());
        assert!(parse_filmography("").is_none());
    }

    #[test]
    fn empty_table_is_empty_vec() {
        let html = r#"<table><tbody class="celebrity-filmography__tbody"></tbody></table>"#;
        assert_eq!(parse_filmography(html), Some(vec![]));
    }

    #[tokio::test]
    async fn redesigned_page_is_structure_changed() {
        let (base, _request) = serve_once("200 OK", "<html><body><ul></ul></body></html>").await;
        let err = actor_filmography(&local_fetcher(&base), "Jane Example")
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::StructureChanged { url, .. } if url.ends_with("/celebrity/jane_example")));
    }

    #[tokio::test]
    async fn unknown_actor_is_not_found() {
        let (base, _request) = serve_once("404 Not Found", "").await;
        let err = actor_filmography(&local_fetcher(&base), "Nobody At All")
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch(FetchError::NotFound { .. })));
    }
}
