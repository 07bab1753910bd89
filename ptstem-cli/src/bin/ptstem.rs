use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ptstem_cli::{describe_step, read_words, stem_words};
use ptstem_savoy::{RuleSet, RuleSource, SavoyStemmer, Step, StemmerConfig};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "ptstem", about = "Savoy light stemmer for Portuguese")]
struct Cli {
    /// Stemmer configuration file (JSON)
    #[arg(long, global = true, env = "PTSTEM_CONFIG")]
    config: Option<PathBuf>,

    /// Rule document overriding the configured rules
    #[arg(long, global = true, env = "PTSTEM_RULES")]
    rules: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Stem the given words, or whitespace-separated words from stdin
    Stem {
        words: Vec<String>,
        /// Print one JSON object per word
        #[arg(long)]
        json: bool,
    },
    /// Show the word produced by each stemming pass
    Trace { word: String },
    /// List the loaded rule tables
    Rules {
        /// Only list this step (pluralreduction, femininereduction, finalvowel)
        #[arg(long)]
        step: Option<String>,
    },
    /// Validate a rule document
    Check { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let mut config = match &cli.config {
        Some(path) => StemmerConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => StemmerConfig::default(),
    };
    if let Some(path) = &cli.rules {
        config.rules = RuleSource::Path(path.clone());
    }
    debug!(?config, "resolved configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Stem { words, json } => {
            let stemmer = SavoyStemmer::from_config(&config).context("loading rules")?;
            let words = if words.is_empty() {
                read_words(io::stdin().lock()).context("reading stdin")?
            } else {
                words
            };
            for record in stem_words(&stemmer, &words) {
                if json {
                    writeln!(out, "{}", serde_json::to_string(&record)?)?;
                } else {
                    writeln!(out, "{}\t{}", record.word, record.stem)?;
                }
            }
        }
        Commands::Trace { word } => {
            let stemmer = SavoyStemmer::from_config(&config).context("loading rules")?;
            let trace = stemmer.trace(&word);
            writeln!(out, "{}", serde_json::to_string_pretty(&trace)?)?;
        }
        Commands::Rules { step } => {
            let rules = config.load_rules().context("loading rules")?;
            let steps = match step {
                Some(name) => vec![name.parse::<Step>()?],
                None => Step::ALL.to_vec(),
            };
            for step in steps {
                for line in describe_step(&rules, step) {
                    writeln!(out, "{line}")?;
                }
            }
        }
        Commands::Check { path } => {
            let rule_set = RuleSet::from_path(&path)
                .with_context(|| format!("invalid rule document {}", path.display()))?;
            let counts: Vec<String> = Step::ALL
                .iter()
                .map(|step| format!("{step}={}", rule_set.table(*step).len()))
                .collect();
            info!(path = %path.display(), "rule document is valid");
            writeln!(out, "ok: {}", counts.join(", "))?;
        }
    }

    Ok(())
}

fn init_logging(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false),
            )
            .init();
    }
}
