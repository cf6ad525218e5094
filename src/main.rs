//! News Sentiment CLI
//!
//! Scores headline sentiment, computes technical indicators, fits topic
//! models and correlates sentiment with daily returns.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use news_sentiment::analysis::{calculate_correlation, sentiment_trends, topic_trends};
use news_sentiment::data::{load_news, load_price_table, HeadlineRecord, PriceSeries};
use news_sentiment::indicators::calculate_all;
use news_sentiment::sentiment::{
    init_compound_lexicon, init_lexicons, init_polarity_lexicon, score_headlines, ScoringMethod,
};
use news_sentiment::topics::TopicModel;
use news_sentiment::utils::{setup_logging, AppConfig};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "news-sentiment")]
#[command(about = "News sentiment and stock price correlation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the sentiment lexicons
    InitLexicon,

    /// Score headlines and print daily label counts
    Sentiment {
        /// Headline CSV
        #[arg(short, long)]
        news: PathBuf,

        /// Scorer (compound or polarity)
        #[arg(short, long, default_value = "compound")]
        method: ScoringMethod,

        /// Print the first N scored headlines
        #[arg(long, default_value = "10")]
        head: usize,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Append technical indicators to a price table
    Indicators {
        /// Price CSV
        #[arg(short, long)]
        prices: PathBuf,

        /// Price column (defaults to the configured one)
        #[arg(long)]
        column: Option<String>,

        /// Print the last N rows
        #[arg(long, default_value = "5")]
        tail: usize,
    },

    /// Correlate daily headline sentiment with daily returns
    Correlate {
        /// Headline CSV
        #[arg(short, long)]
        news: PathBuf,

        /// Price CSVs; returns come from the first
        #[arg(short, long, required = true, num_args = 1..)]
        prices: Vec<PathBuf>,

        /// Only headlines filed under this ticker
        #[arg(long)]
        stock: Option<String>,

        /// Scorer (defaults to the configured one)
        #[arg(short, long)]
        method: Option<ScoringMethod>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fit a topic model over headlines
    Topics {
        /// Headline CSV
        #[arg(short, long)]
        news: PathBuf,

        /// Number of topics (defaults to the configured one)
        #[arg(short = 'k', long)]
        topics: Option<usize>,

        /// Random seed (defaults to the configured one)
        #[arg(long)]
        seed: Option<u64>,

        /// Also print mean topic weights per date
        #[arg(long)]
        trends: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    setup_logging(level)?;

    match cli.command {
        Commands::InitLexicon => {
            let compound = init_compound_lexicon();
            let polarity = init_polarity_lexicon();
            println!(
                "VADER lexicon: {}",
                if compound.performed { "loaded" } else { "already loaded" }
            );
            println!(
                "Polarity lexicon: {} ({} words)",
                if polarity.performed { "loaded" } else { "already loaded" },
                polarity.lexicon.len()
            );
        }

        Commands::Sentiment {
            news,
            method,
            head,
            json,
        } => {
            let records = require_news(&news)?;
            let scored = score_headlines(&records, method, &init_lexicons());
            let trends = sentiment_trends(&scored);

            if json {
                println!("{}", serde_json::to_string_pretty(&trends)?);
                return Ok(());
            }

            println!("Scored {} headlines with {}", scored.len(), method);
            for s in scored.iter().take(head) {
                let label = s.label.map(|l| l.to_string()).unwrap_or_default();
                println!("{} {:>8.4} {:<8} {}", s.date(), s.score, label, s.record.headline);
            }

            println!("\n{:<12} {:>8} {:>8} {:>8}", "date", "positive", "neutral", "negative");
            for t in &trends {
                println!(
                    "{:<12} {:>8} {:>8} {:>8}",
                    t.date.to_string(),
                    t.positive,
                    t.neutral,
                    t.negative
                );
            }
        }

        Commands::Indicators {
            prices,
            column,
            tail,
        } => {
            let column = column.unwrap_or_else(|| config.indicators.price_column.clone());
            let table = load_price_table(&prices)
                .with_context(|| format!("failed to load prices from {}", prices.display()))?;
            let table = calculate_all(&table, &column, &config.indicators.params)?;

            let names = table.column_names();
            println!("{:<12} {}", "date", names.iter().map(|n| format!("{:>12}", n)).collect::<String>());

            let start = table.len().saturating_sub(tail);
            for (i, date) in table.dates().iter().enumerate().skip(start) {
                let row: String = names
                    .iter()
                    .filter_map(|n| table.column(n))
                    .map(|values| format!("{:>12.4}", values[i]))
                    .collect();
                println!("{:<12} {}", date.to_string(), row);
            }
        }

        Commands::Correlate {
            news,
            prices,
            stock,
            method,
            json,
        } => {
            let mut records = require_news(&news)?;
            if let Some(ticker) = &stock {
                records.retain(|r| r.stock.as_deref() == Some(ticker.as_str()));
                info!("{} headlines filed under {}", records.len(), ticker);
            }

            let method = method.unwrap_or(config.correlation.method);
            let scored = score_headlines(&records, method, &init_lexicons());

            let series = prices
                .iter()
                .map(|path| load_series(path, &config.correlation.close_column))
                .collect::<Result<Vec<_>>>()?;

            let result = calculate_correlation(&scored, &series)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Method:      {}", method);
                println!("Headlines:   {} in, {} aligned", result.report.news_rows, result.report.output_rows);
                println!("Dates:       {} aligned, {} paired", result.report.dates_kept, result.points);
                if result.is_defined() {
                    println!("Correlation: {:.4}", result.coefficient);
                } else {
                    println!("Correlation: undefined");
                }
            }
        }

        Commands::Topics {
            news,
            topics,
            seed,
            trends,
        } => {
            let records = require_news(&news)?;

            let mut params = config.topics;
            if let Some(k) = topics {
                params.n_topics = k;
            }
            if let Some(seed) = seed {
                params.seed = seed;
            }

            let model = TopicModel::fit(&records, &params)?;
            for topic in &model.topics {
                println!("{}", topic);
            }

            if trends {
                println!();
                for t in topic_trends(&records, &model.doc_topics)? {
                    let weights: Vec<String> = t.weights.iter().map(|w| format!("{:.3}", w)).collect();
                    println!("{} {}", t.date, weights.join(" "));
                }
            }
        }
    }

    Ok(())
}

/// Load headlines, failing when nothing usable was read
fn require_news(path: &Path) -> Result<Vec<HeadlineRecord>> {
    let records = load_news(path);
    if records.is_empty() {
        bail!("no headlines loaded from {}", path.display());
    }
    Ok(records)
}

/// Load one price CSV as a series named after its file stem
fn load_series(path: &Path, close_column: &str) -> Result<PriceSeries> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("prices")
        .to_string();

    let table = load_price_table(path)
        .with_context(|| format!("failed to load prices from {}", path.display()))?;

    // lowercase `close` is common in exported data
    let column = if table.column(close_column).is_some() {
        close_column.to_string()
    } else if table.column(&close_column.to_lowercase()).is_some() {
        warn!("{}: using `{}` for `{}`", name, close_column.to_lowercase(), close_column);
        close_column.to_lowercase()
    } else {
        bail!("{}: no `{}` column", path.display(), close_column);
    };

    Ok(table.to_series(name, &column)?)
}
