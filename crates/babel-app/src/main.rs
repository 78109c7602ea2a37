use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use babel_cache::{Cache, MemoryCache};
use babel_config::Config;
use babel_gateway::Gateway;
use babel_types::{LanguageTag, TranslationRequest, TranslationResult};
use clap::Parser;
use tokio::signal;
use tokio::task::JoinSet;

pub mod cli;
pub mod logging;
pub mod wiring;

use self::cli::{Cli, Command, TranslateArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::new(),
    };
    logging::init(config.log_json);

    match cli.command {
        Command::Translate(args) => translate(config, args).await,
    }
}

async fn translate(config: Config, args: TranslateArgs) -> anyhow::Result<()> {
    let source = LanguageTag::parse(&args.from).context("invalid --from language")?;
    let target = LanguageTag::parse(&args.to).context("invalid --to language")?;

    let providers = wiring::build_providers(&config);
    if providers.is_empty() {
        // Every request would fail; make the misconfiguration obvious
        anyhow::bail!("no translation backends active, exiting");
    }

    let cache = if config.cache.enabled {
        let cache = MemoryCache::load_from_path(&config.cache.snapshot_path)
            .context("failed to load cache snapshot")?;
        Some(Arc::new(cache))
    } else {
        None
    };

    let mut gateway = Gateway::new(providers).with_attempt_timeout(config.attempt_timeout());
    if let Some(cache) = &cache {
        gateway = gateway.with_cache(cache.clone());
    }
    let gateway = Arc::new(gateway);
    tracing::info!(
        providers = ?gateway.order().await,
        attempt_timeout_ms = gateway.attempt_timeout().as_millis() as u64,
        "Gateway ready"
    );

    let mut tasks = JoinSet::new();
    for phrase in args.phrases {
        let gateway = Arc::clone(&gateway);
        let request = TranslationRequest::new(phrase, source.clone(), target.clone());
        tasks.spawn(async move { gateway.handle(&request).await });
    }

    let shutdown = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let outcome = tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
            tasks.abort_all();
            None
        }
        results = collect(&mut tasks) => Some(results),
    };

    if let Some(cache) = &cache {
        if let Some(results) = &outcome {
            settle_cache_writes(cache, results).await;
        }
        cache
            .save_to_path(&config.cache.snapshot_path)
            .context("failed to save cache snapshot")?;
    }

    let Some(results) = outcome else {
        anyhow::bail!("interrupted before all phrases were translated");
    };

    let failed = report(&results);
    if failed > 0 {
        anyhow::bail!("{failed} of {} phrases failed to translate", results.len());
    }

    Ok(())
}

async fn collect(tasks: &mut JoinSet<TranslationResult>) -> Vec<TranslationResult> {
    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => tracing::error!("translation task panicked: {e}"),
        }
    }
    results
}

/// Cache writes are detached from the response path; give them a moment to land before the snapshot
async fn settle_cache_writes(cache: &MemoryCache, results: &[TranslationResult]) {
    for _ in 0..50 {
        let pending = results
            .iter()
            .filter(|r| r.is_success())
            .any(|r| !cache.has(&r.phrase, &r.target));
        if !pending {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    tracing::warn!("Some cache writes did not finish before the snapshot");
}

/// Print one line per phrase and return how many failed
fn report(results: &[TranslationResult]) -> usize {
    let mut failed = 0;
    for result in results {
        match &result.error {
            None => println!("{}\t{}", result.target, result.translated_phrase),
            Some(kind) => {
                failed += 1;
                eprintln!("error: {:?}: {kind}", result.phrase);
            }
        }
    }
    failed
}
