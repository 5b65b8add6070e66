//! Name → URL slug, plus the text cleaner shared with review extraction.

/// Site chrome that leaks into scraped names and review blocks.
const BOILERPLATE: &str = "User Ratings";

/// Drop the boilerplate marker, trim, and remove ASCII punctuation.
pub fn clean_text(input: &str) -> String {
    strip_punctuation(input.replace(BOILERPLATE, "").trim(), |_| false)
}

/// `"Tom Hanks"` → `"tom_hanks"`. Underscores survive, so slugs map to themselves.
pub fn slugify(name: &str) -> String {
    let cleaned = strip_punctuation(name.replace(BOILERPLATE, "").trim(), |c| c == '_');
    cleaned
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn strip_punctuation(s: &str, keep: impl Fn(char) -> bool) -> String {
    s.chars()
        .filter(|&c| !c.is_ascii_punctuation() || keep(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name() {
        assert_eq!(slugify("Tom Hanks"), "tom_hanks");
    }

    #[test]
    fn punctuation_and_case() {
        assert_eq!(slugify("  Dr. Strangelove!  "), "dr_strangelove");
        assert_eq!(slugify("Ocean's Eleven"), "oceans_eleven");
        assert_eq!(slugify("Spider-Man: No Way Home"), "spiderman_no_way_home");
    }

    #[test]
    fn boilerplate_removed() {
        assert_eq!(slugify("Meryl Streep User Ratings"), "meryl_streep");
    }

    #[test]
    fn idempotent_on_slugs() {
        for name in ["Tom Hanks", "Dr. Strangelove", "the_godfather", "Amélie", "x"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", name);
        }
    }

    #[test]
    fn clean_text_strips_everything() {
        assert_eq!(
            clean_text("  A gripping, well-made thriller!  User Ratings"),
            "A gripping wellmade thriller"
        );
        assert_eq!(clean_text("snake_case"), "snakecase");
        assert_eq!(clean_text("...!!!"), "");
    }
}
