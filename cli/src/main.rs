use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use seeds_engine::config::{AutoplayConfig, ConfigManager, FileContentProvider};
use seeds_engine::persistence::{SaveStore, StatisticsStore};
use seeds_engine::session::run_autoplay;
use seeds_engine::{
    AutoplayControl, AutoplayOutcome, BotWorker, EngineConfig, GameMode, GameSession, GameStatus,
    SessionRng, log, logger,
};
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(name = "seeds_autoplay")]
struct Args {
    /// classic, random, easy or levels
    #[arg(long, default_value = "classic")]
    mode: GameMode,
    #[arg(long)]
    seed: Option<u64>,
    /// Level id, required for the levels mode
    #[arg(long)]
    level: Option<String>,
    #[arg(long, default_value = "seeds.yaml")]
    config: String,
    /// Saved game file; an unfinished game is written here on exit
    #[arg(long)]
    save: Option<String>,
    /// Continue the game stored in --save instead of starting a new one
    #[arg(long)]
    resume: bool,
    #[arg(long)]
    stats: Option<String>,
    /// Play without pacing delays
    #[arg(long)]
    instant: bool,
    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Autoplay".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<FileContentProvider, EngineConfig> =
        ConfigManager::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    if args.instant {
        config.autoplay = AutoplayConfig::instant();
    }

    let rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    let save_store = args.save.as_deref().map(SaveStore::from_yaml_file);
    let stats_store = args.stats.as_deref().map(StatisticsStore::from_yaml_file);

    let saved = match &save_store {
        Some(store) if args.resume => store.load()?,
        _ => None,
    };
    let session = match saved {
        Some(saved) => GameSession::restore(config.clone(), saved, rng),
        None => {
            let session = GameSession::new(config.clone(), args.mode, args.level.as_deref(), rng)?;
            if let Some(stats) = &stats_store
                && let Err(e) = stats.record_started(session.mode())
            {
                log!("Failed to update statistics: {}", e);
            }
            session
        }
    };
    let mode = session.mode();

    let session = Arc::new(Mutex::new(session));
    let worker = BotWorker::spawn(config);
    let control = AutoplayControl::new();
    control.start();

    let interrupt = control.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log!("Interrupted, stopping autoplay");
            interrupt.stop();
        }
    });

    let started = Instant::now();
    let outcome = run_autoplay(session.clone(), &worker, &control).await;

    let mut session = session.lock().await;
    session.add_elapsed(started.elapsed().as_secs());
    log!(
        "{:?} after {}s: {} pairs, {} additions, {} powerups, {} cells left in play of {}",
        outcome,
        session.elapsed_seconds(),
        session.pairs_removed(),
        session.additions(),
        session.powerups_used(),
        session.board().in_play_count(),
        session.board().len()
    );

    if outcome == AutoplayOutcome::Finished(GameStatus::Won)
        && let Some(stats) = &stats_store
        && let Err(e) = stats.record_won(mode)
    {
        log!("Failed to update statistics: {}", e);
    }

    if let Some(store) = &save_store {
        let result = match outcome {
            AutoplayOutcome::Finished(_) => store.clear(),
            _ => store.save(&session.serialize()),
        };
        if let Err(e) = result {
            log!("Failed to persist game: {}", e);
        }
    }

    Ok(())
}
