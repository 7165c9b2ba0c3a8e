//! Discerner CLI: attention-spike event studies.
//!
//! Commands pick the page set:
//! - `financials`: built-in finance topics, priced against SPY
//! - `sp500`: current S&P 500 members, each priced against its own ticker
//! - `custom`: literal `SYMBOL:Topic` pairs
//!
//! Study flags override values loaded from `--config`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use discerner_core::data::{WikimediaViews, WikipediaSp500, YahooProvider};
use discerner_core::pages::{NamedPages, PageSource};
use discerner_core::DataType;
use discerner_runner::{format_summary, resolve_targets, run_study, save_artifacts, StudyConfig};

#[derive(Parser)]
#[command(
    name = "discerner",
    about = "Discerner: do Wikipedia attention spikes mark price inflections?"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Study type: RANDOM, RECENT or HISTORICAL.
    #[arg(short = 't', long, global = true)]
    data_type: Option<DataType>,

    /// Window length in days on either side of an event.
    #[arg(short, long, global = true)]
    interval: Option<usize>,

    /// Quantile above which daily views count as an outlier.
    #[arg(short, long, global = true)]
    probability: Option<f64>,

    /// Recency window for RECENT studies, in days.
    #[arg(short, long, global = true)]
    days: Option<u32>,

    /// Seed for RANDOM studies.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Calendar year to study. Defaults to the current year.
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Path to a TOML study config.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write chart.csv and events.csv into this directory.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Debug logging.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Built-in finance topics, priced against SPY.
    Financials,
    /// S&P 500 members from Wikipedia.
    Sp500,
    /// Literal SYMBOL:Topic pairs (e.g. AAPL:Apple_Inc.).
    Custom {
        #[arg(required = true)]
        pairs: Vec<String>,
    },
}

impl Cli {
    fn study_config(&self) -> Result<StudyConfig> {
        let mut config = match &self.config {
            Some(path) => StudyConfig::from_file(path)?,
            None => StudyConfig::default(),
        };
        if let Some(data_type) = self.data_type {
            config.data_type = data_type;
        }
        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        if let Some(probability) = self.probability {
            config.probability = probability;
        }
        if let Some(days) = self.days {
            config.days = days;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.year.is_some() {
            config.year = self.year;
        }
        config.validate()?;
        Ok(config)
    }

    fn page_source(&self) -> Result<PageSource> {
        let source = match &self.command {
            Commands::Financials => PageSource::Named(NamedPages::Financials),
            Commands::Sp500 => PageSource::Named(NamedPages::Sp500),
            Commands::Custom { pairs } => PageSource::literal(pairs.as_slice())?,
        };
        Ok(source)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.study_config()?;
    let source = cli.page_source()?;

    let targets = resolve_targets(&source, WikipediaSp500::new)?;

    let prices = YahooProvider::new()?;
    let views = WikimediaViews::new()?;
    let report = run_study(&config, &targets, &prices, &views, Utc::now())?;

    print!("{}", format_summary(&report));

    if let Some(dir) = &cli.output_dir {
        match save_artifacts(&report, dir)
            .with_context(|| format!("failed to export to {}", dir.display()))?
        {
            Some(path) => println!("Artifacts saved to: {}", path.display()),
            None => tracing::warn!("no evaluated events, nothing exported"),
        }
    }

    Ok(())
}

/// Log to stderr so stdout carries only the report. `--verbose` forces debug;
/// otherwise `RUST_LOG` applies, defaulting to info.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "discerner", "-t", "random", "-i", "10", "--seed", "3", "financials",
        ]);
        let config = cli.study_config().unwrap();
        assert_eq!(config.data_type, DataType::Random);
        assert_eq!(config.interval, 10);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.probability, 0.9);
    }

    #[test]
    fn flags_after_subcommand_are_accepted() {
        let cli = Cli::parse_from(["discerner", "sp500", "--data-type", "RECENT", "-d", "2"]);
        let config = cli.study_config().unwrap();
        assert_eq!(config.data_type, DataType::Recent);
        assert_eq!(config.days, 2);
        assert!(matches!(
            cli.page_source().unwrap(),
            PageSource::Named(NamedPages::Sp500)
        ));
    }

    #[test]
    fn custom_pairs_are_parsed() {
        let cli = Cli::parse_from(["discerner", "custom", "AAPL:Apple_Inc.", "MSFT:Microsoft"]);
        let PageSource::Literal(pairs) = cli.page_source().unwrap() else {
            panic!("expected literal pairs");
        };
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].topic, "Microsoft");
    }

    #[test]
    fn malformed_pair_is_rejected() {
        let cli = Cli::parse_from(["discerner", "custom", "AAPL"]);
        assert!(cli.page_source().is_err());
    }

    #[test]
    fn invalid_probability_is_rejected() {
        let cli = Cli::parse_from(["discerner", "-p", "1.5", "financials"]);
        assert!(cli.study_config().is_err());
    }
}
