pub mod filmography;
pub mod reviews;

use scraper::ElementRef;

/// All descendant text of an element, trimmed. Inner whitespace is kept as-is.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
