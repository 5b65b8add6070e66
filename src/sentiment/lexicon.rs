use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)*").unwrap());

/// Multiplier applied to a sentiment word preceded by a negation.
const NEGATION_FACTOR: f64 = -0.5;
/// How many tokens before a sentiment word may modify it.
const MODIFIER_WINDOW: usize = 2;

const BUILTIN: &[(&str, f64)] = &[
    // positive
    ("absorbing", 0.5),
    ("amazing", 0.6),
    ("astonishing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("beautifully", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("breathtaking", 0.8),
    ("brilliant", 0.9),
    ("brilliantly", 0.9),
    ("captivating", 0.6),
    ("charming", 0.5),
    ("clever", 0.5),
    ("compelling", 0.5),
    ("decent", 0.17),
    ("delight", 0.7),
    ("delightful", 1.0),
    ("effective", 0.6),
    ("elegant", 0.5),
    ("engaging", 0.4),
    ("enjoy", 0.4),
    ("enjoyable", 0.5),
    ("entertaining", 0.5),
    ("excellent", 1.0),
    ("exciting", 0.3),
    ("exquisite", 0.9),
    ("fantastic", 0.4),
    ("fine", 0.42),
    ("fresh", 0.3),
    ("fun", 0.3),
    ("funny", 0.25),
    ("glorious", 1.0),
    ("good", 0.7),
    ("gorgeous", 0.7),
    ("great", 0.8),
    ("gripping", 0.5),
    ("happy", 0.8),
    ("heartfelt", 0.5),
    ("hilarious", 0.5),
    ("impressive", 1.0),
    ("inspired", 0.6),
    ("intelligent", 0.8),
    ("interesting", 0.5),
    ("inventive", 0.5),
    ("like", 0.2),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("masterful", 0.8),
    ("masterpiece", 0.8),
    ("memorable", 0.5),
    ("moving", 0.3),
    ("nice", 0.6),
    ("original", 0.38),
    ("outstanding", 0.5),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("pleasure", 0.6),
    ("powerful", 0.3),
    ("remarkable", 0.75),
    ("rewarding", 0.6),
    ("rich", 0.38),
    ("riveting", 0.5),
    ("satisfying", 0.5),
    ("smart", 0.2),
    ("strong", 0.43),
    ("stunning", 0.5),
    ("superb", 1.0),
    ("sweet", 0.35),
    ("terrific", 1.0),
    ("thrilling", 0.6),
    ("touching", 0.5),
    ("triumph", 0.7),
    ("warm", 0.6),
    ("winning", 0.5),
    ("witty", 0.5),
    ("wonderful", 1.0),
    ("worthy", 0.5),
    // negative
    ("annoying", -0.8),
    ("awful", -1.0),
    ("awkward", -0.3),
    ("bad", -0.7),
    ("badly", -0.7),
    ("bland", -0.3),
    ("boring", -1.0),
    ("cheap", -0.4),
    ("cliched", -0.4),
    ("clumsy", -0.25),
    ("confused", -0.4),
    ("confusing", -0.3),
    ("disappointing", -0.6),
    ("disappointment", -0.6),
    ("dreadful", -1.0),
    ("dull", -0.31),
    ("dumb", -0.38),
    ("empty", -0.1),
    ("fail", -0.5),
    ("failed", -0.5),
    ("fails", -0.5),
    ("failure", -0.32),
    ("flat", -0.2),
    ("forgettable", -0.5),
    ("generic", -0.2),
    ("hate", -0.8),
    ("hated", -0.9),
    ("hollow", -0.3),
    ("horrible", -1.0),
    ("incoherent", -0.5),
    ("inept", -0.5),
    ("lazy", -0.25),
    ("lifeless", -0.5),
    ("mediocre", -0.5),
    ("mess", -0.4),
    ("messy", -0.4),
    ("nonsense", -0.5),
    ("overlong", -0.3),
    ("painful", -0.7),
    ("pointless", -0.5),
    ("poor", -0.4),
    ("poorly", -0.4),
    ("predictable", -0.3),
    ("ridiculous", -0.33),
    ("sad", -0.5),
    ("shallow", -0.2),
    ("silly", -0.5),
    ("sloppy", -0.3),
    ("slow", -0.3),
    ("stupid", -0.8),
    ("tedious", -0.5),
    ("terrible", -1.0),
    ("tiresome", -0.5),
    ("ugly", -0.7),
    ("unbearable", -0.8),
    ("unfunny", -0.5),
    ("waste", -0.2),
    ("wasted", -0.2),
    ("weak", -0.38),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("deeply", 1.3),
    ("extremely", 1.5),
    ("fairly", 0.9),
    ("highly", 1.3),
    ("incredibly", 1.4),
    ("most", 1.2),
    ("quite", 1.1),
    ("rather", 0.9),
    ("really", 1.2),
    ("remarkably", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.8),
    ("thoroughly", 1.3),
    ("too", 1.2),
    ("totally", 1.3),
    ("truly", 1.2),
    ("utterly", 1.5),
    ("very", 1.3),
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hardly", "isnt",
    "neither", "never", "no", "nor", "not", "shouldnt", "wasnt", "werent", "without", "wont",
    "wouldnt",
];

/// Word-level polarity lexicon with intensifier and negation handling.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashMap<String, f64>,
}

impl Lexicon {
    pub fn builtin() -> Self {
        Lexicon {
            words: BUILTIN.iter().map(|&(w, p)| (w.to_string(), p)).collect(),
        }
    }

    /// Built-in lexicon overlaid with a JSON object of `word -> polarity`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon {:?}", path))?;
        let extra: HashMap<String, f64> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse lexicon {:?}", path))?;
        let mut lexicon = Self::builtin();
        lexicon.extend(extra);
        info!(path = ?path, words = lexicon.word_count(), "Loaded lexicon");
        Ok(lexicon)
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, f64)>) {
        for (word, polarity) in entries {
            self.words
                .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Mean modified polarity of the sentiment words in `text`, in [-1, 1].
    /// Text with no known words scores 0.0.
    pub fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        let tokens: Vec<String> = TOKEN_RE
            .find_iter(&lowered)
            .map(|m| m.as_str().replace('\'', ""))
            .collect();

        let mut total = 0.0;
        let mut matched = 0usize;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.words.get(token) else {
                continue;
            };
            let mut score = base;
            for prev in tokens[i.saturating_sub(MODIFIER_WINDOW)..i].iter().rev() {
                if let Some(factor) = intensity(prev) {
                    score *= factor;
                } else if NEGATIONS.contains(&prev.as_str()) {
                    score *= NEGATION_FACTOR;
                    break;
                } else {
                    break;
                }
            }
            total += score.clamp(-1.0, 1.0);
            matched += 1;
        }

        if matched == 0 {
            0.0
        } else {
            (total / matched as f64).clamp(-1.0, 1.0)
        }
    }
}

fn intensity(token: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == token)
        .map(|&(_, m)| m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn positive_and_negative() {
        let lex = Lexicon::builtin();
        assert!(lex.polarity("A great and wonderful film") > 0.0);
        assert!(lex.polarity("Dull boring and predictable") < 0.0);
    }

    #[test]
    fn unknown_or_empty_is_neutral() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.polarity(""), 0.0);
        assert_eq!(lex.polarity("The film runs two hours"), 0.0);
    }

    #[test]
    fn averages_matched_words() {
        let lex = Lexicon::builtin();
        // good 0.7, bad -0.7
        assert_relative_eq!(lex.polarity("good but bad"), 0.0);
        // great 0.8, excellent 1.0
        assert_relative_eq!(lex.polarity("great cast, excellent script"), 0.9, epsilon = 1e-9);
    }

    #[test]
    fn intensifier_scales() {
        let lex = Lexicon::builtin();
        assert_relative_eq!(lex.polarity("good"), 0.7);
        assert_relative_eq!(lex.polarity("very good"), 0.91, epsilon = 1e-9);
        assert!(lex.polarity("slightly good") < lex.polarity("good"));
    }

    #[test]
    fn negation_flips_and_dampens() {
        let lex = Lexicon::builtin();
        assert_relative_eq!(lex.polarity("not good"), -0.35);
        assert_relative_eq!(lex.polarity("isn't bad"), 0.35);
        assert_relative_eq!(lex.polarity("isnt bad"), 0.35);
        assert_relative_eq!(lex.polarity("not very good"), -0.455, epsilon = 1e-9);
    }

    #[test]
    fn clamped_to_unit_range() {
        let lex = Lexicon::builtin();
        assert_relative_eq!(lex.polarity("absolutely perfect"), 1.0);
        assert_relative_eq!(lex.polarity("utterly terrible"), -1.0);
    }

    #[test]
    fn json_overrides_builtin() {
        let dir = std::env::temp_dir().join(format!("rt_lexicon_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lexicon.json");
        std::fs::write(&path, r#"{"good": 0.1, "Zesty": 0.9}"#).unwrap();

        let lex = Lexicon::from_json_file(&path).unwrap();
        assert_relative_eq!(lex.polarity("good"), 0.1);
        assert_relative_eq!(lex.polarity("zesty"), 0.9);
        assert_eq!(lex.word_count(), Lexicon::builtin().word_count() + 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bad_json_is_error() {
        let path = std::env::temp_dir().join(format!("rt_lexicon_bad_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        assert!(Lexicon::from_json_file(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
