mod config;
mod error;
mod fetcher;
mod parser;
mod sentiment;
mod slug;
mod summary;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use config::Settings;
use fetcher::Fetcher;
use parser::filmography::{actor_filmography, FilmographyRow, COLUMNS};
use parser::reviews::movie_reviews;
use sentiment::{actor_sentiment, score_each, score_reviews, Lexicon};
use summary::{actor_summary, ActorSummary};

#[derive(Parser)]
#[command(
    name = "rt_actor_scores",
    about = "Actor filmography, box office and critic sentiment from Rotten Tomatoes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URL slug for a person or movie name
    Slug { name: String },
    /// Scrape an actor's filmography table
    Filmography {
        actor: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Scrape the first page of a movie's critic reviews and score each one
    Reviews { movie: String },
    /// Average review sentiment across an actor's filmography
    Sentiment { actor: String },
    /// One summary row per actor
    Summary {
        #[arg(required = true)]
        actors: Vec<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Everything a network command needs.
struct App {
    fetcher: Fetcher,
    lexicon: Lexicon,
}

impl App {
    fn load() -> Result<Self> {
        let settings = Settings::load().context("Failed to load settings")?;
        info!(
            base_url = %settings.base_url,
            timeout_secs = ?settings.timeout_secs,
            "Settings loaded"
        );
        let lexicon = match &settings.lexicon_path {
            Some(path) => Lexicon::from_json_file(path)?,
            None => Lexicon::builtin(),
        };
        Ok(App {
            fetcher: Fetcher::new(&settings)?,
            lexicon,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Slug { name } => {
            println!("{}", slug::slugify(&name));
            Ok(())
        }
        Commands::Filmography { actor, json } => {
            let app = App::load()?;
            let rows = actor_filmography(&app.fetcher, &actor).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("Filmography table is empty.");
            } else {
                print_filmography(&rows);
            }
            Ok(())
        }
        Commands::Reviews { movie } => {
            let app = App::load()?;
            let reviews = movie_reviews(&app.fetcher, &movie).await?;
            let scored = score_each(&app.lexicon, &reviews);
            if scored.is_empty() {
                println!("No reviews found.");
                return Ok(());
            }

            println!("{:>3} | {:>8} | Review", "#", "Polarity");
            println!("{}", "-".repeat(100));
            for (i, r) in scored.iter().enumerate() {
                println!("{:>3} | {:>8.2} | {}", i + 1, r.polarity, truncate(&r.text, 80));
            }
            println!(
                "\n{} reviews | mean polarity {}",
                scored.len(),
                score_reviews(&app.lexicon, &reviews)
            );
            Ok(())
        }
        Commands::Sentiment { actor } => {
            let app = App::load()?;
            let sentiment = actor_sentiment(&app.fetcher, &app.lexicon, &actor).await?;
            println!("{}: {}", actor, sentiment);
            Ok(())
        }
        Commands::Summary { actors, json } => {
            let app = App::load()?;
            let mut summaries = Vec::with_capacity(actors.len());
            for actor in &actors {
                match actor_summary(&app.fetcher, &app.lexicon, actor).await {
                    Ok(s) => summaries.push(s),
                    Err(e) => error!(actor = %actor, "Summary failed: {}", e),
                }
            }
            if summaries.is_empty() {
                anyhow::bail!("No summary could be built for {} actor(s)", actors.len());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                print_summaries(&summaries);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!(elapsed = %elapsed_label(elapsed), "Done");
    }

    result
}

fn print_filmography(rows: &[FilmographyRow]) {
    println!(
        "{:<14} | {:<36} | {:<20} | {:>10} | {:>4}",
        COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4]
    );
    println!("{}", "-".repeat(97));
    for r in rows {
        println!(
            "{:<14} | {:<36} | {:<20} | {:>10} | {:>4}",
            truncate(&r.rating, 14),
            truncate(&r.title, 33),
            truncate(&r.credit, 17),
            r.box_office,
            r.year
        );
    }
    println!("\n{} rows", rows.len());
}

fn print_summaries(rows: &[ActorSummary]) {
    println!(
        "{:<24} | {:>6} | {:>8} | {:>7} | {:>15} | {:>9} | {:>8} | {:>5} | {:>5}",
        "Actor", "Movies", "Unscored", "Rating", "Box office", "Sentiment", "Per year", "Start", "End"
    );
    println!("{}", "-".repeat(115));
    for r in rows {
        println!(
            "{:<24} | {:>6} | {:>8} | {:>7.2} | {:>15} | {:>9} | {:>8.2} | {:>5} | {:>5}",
            truncate(&r.actor, 21),
            r.total_movies,
            r.movies_not_scored,
            r.avg_rating,
            r.total_box_office,
            r.avg_review_sentiment.to_string(),
            r.movies_per_year,
            r.start_year,
            r.end_year
        );
    }
}

/// Cut a table cell to `max` characters, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

/// Wall-clock label for the run: "4.2s", "1m 15s", "1h 2m 5s".
fn elapsed_label(d: Duration) -> String {
    let (h, m, s) = (d.as_secs() / 3600, d.as_secs() / 60 % 60, d.as_secs() % 60);
    match (h, m) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{}m {}s", m, s),
        _ => format!("{}h {}m {}s", h, m, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn summary_takes_many_actors() {
        let cli = Cli::try_parse_from(["rt_actor_scores", "summary", "Tom Hanks", "Meryl Streep", "--json"])
            .unwrap();
        match cli.command {
            Commands::Summary { actors, json } => {
                assert_eq!(actors, ["Tom Hanks", "Meryl Streep"]);
                assert!(json);
            }
            _ => panic!("expected summary"),
        }
        assert!(Cli::try_parse_from(["rt_actor_scores", "summary"]).is_err());
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a longer...");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Amélie", 6), "Amélie");
        assert_eq!(truncate("Amélie Poulain", 4), "Amél...");
    }

    #[test]
    fn elapsed_labels() {
        assert_eq!(elapsed_label(Duration::from_millis(4200)), "4.2s");
        assert_eq!(elapsed_label(Duration::from_secs(75)), "1m 15s");
        assert_eq!(elapsed_label(Duration::from_secs(3725)), "1h 2m 5s");
        assert_eq!(elapsed_label(Duration::from_secs(3600)), "1h 0m 0s");
    }
}
