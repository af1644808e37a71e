use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feedback_triage::{analyze_pending, Classifier, ClientConfig, FeedbackStore};
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Skip the model and classify with keyword analysis only
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a single piece of feedback and print the judgment as JSON
    Classify {
        /// The feedback text
        text: String,
    },
    /// Seed sample feedback, analyze it, and print aggregate stats
    Demo {
        /// Maximum number of pending items to analyze
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
}

fn build_classifier(args: &Args) -> Result<Classifier> {
    let mut config = ClientConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if args.offline {
        info!("Offline mode: using keyword analysis only");
        config = config.offline();
    }
    Ok(Classifier::builder().with_http_client(config)?.build()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let classifier = build_classifier(&args)?;
    info!("Classifier ready: {:?}", classifier.info());

    match args.command {
        Command::Classify { text } => {
            let judgment = classifier.classify(&text).await;
            println!("{}", serde_json::to_string_pretty(&judgment)?);
        }
        Command::Demo { limit } => {
            let store = FeedbackStore::new();
            store.seed_mock().await?;

            let start_time = Instant::now();
            let updated = analyze_pending(&store, &classifier, limit, |done, total| {
                info!("Analyzed {}/{} (elapsed: {:.2?})", done, total, start_time.elapsed());
            })
            .await;
            info!("=== Analysis complete: {} items in {:.2?} ===", updated, start_time.elapsed());

            println!("{}", serde_json::to_string_pretty(&store.stats().await)?);
        }
    }

    Ok(())
}
