//! CLI entrypoint for Museum Curator
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use curator_application::{
    EventLogger, ExhibitionStore, GenerateExhibitionUseCase, ModelClient, NoEventLogger,
};
use curator_infrastructure::{
    ConfigLoader, FileConfig, GeminiGateway, JsonlEventLogger, OfflineSearch,
    SqliteExhibitionStore,
};
use curator_presentation::{
    Cli, Command, ConsoleFormatter, ExhibitionView, OutputFormat, ProgressReporter,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };

    let _log_guard = init_logging(cli.verbose, &config);
    info!("Starting Museum Curator");

    for issue in config.validate() {
        warn!("Configuration issue: {}", issue);
    }

    let store = Arc::new(
        SqliteExhibitionStore::open(&config.storage.database_path).with_context(|| {
            format!(
                "Failed to open exhibition database {}",
                config.storage.database_path.display()
            )
        })?,
    );

    match cli.command.clone() {
        Some(Command::Generate {
            topic,
            output,
            no_images,
        }) => generate(&cli, &config, store, &topic, output, no_images).await,
        Some(Command::List { limit }) => {
            let summaries = store.list_recent(limit).await?;
            print!("{}", ConsoleFormatter::format_summaries(&summaries));
            Ok(())
        }
        Some(Command::Show { id, output }) => {
            let Some(stored) = store.retrieve(id).await? else {
                bail!("No exhibition with id {id}. Use `museum-curator list` to see stored ids.");
            };
            println!("{}", render(ExhibitionView::from(&stored), output));
            Ok(())
        }
        None => bail!("A command is required. Try `museum-curator generate \"<topic>\"`."),
    }
}

/// Install the stderr subscriber, plus a daily log file under the logs dir.
///
/// The returned guard must live until exit so buffered file lines flush.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match std::fs::create_dir_all(&config.storage.logs_dir) {
        Ok(()) => {
            let appender =
                tracing_appender::rolling::daily(&config.storage.logs_dir, "museum-curator.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

async fn generate(
    cli: &Cli,
    config: &FileConfig,
    store: Arc<SqliteExhibitionStore>,
    topic: &str,
    output: OutputFormat,
    no_images: bool,
) -> Result<()> {
    // === Dependency Injection ===
    let gateway = Arc::new(
        GeminiGateway::from_env(
            &config.model.api_key_env,
            &config.model.base_url,
            config.model.timeout(),
        )
        .context("Cannot reach the model service")?,
    );
    let client = Arc::new(
        ModelClient::new(
            gateway,
            config.model.to_model_settings(),
            config.rate_limit.to_retry_policy(),
        )
        .with_cache_ttl(config.cache.ttl()),
    );

    let events: Arc<dyn EventLogger> =
        match JsonlEventLogger::for_run(&config.storage.logs_dir, topic) {
            Some(logger) => {
                info!("Writing run events to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoEventLogger),
        };

    let mut pipeline = config.pipeline.to_pipeline_config();
    if no_images {
        pipeline = pipeline.with_image_generation(false);
    }

    let use_case = GenerateExhibitionUseCase::new(
        client,
        Arc::new(OfflineSearch::new()),
        store,
        pipeline,
        events,
    );

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|           Museum Curator - Exhibition Pipeline             |");
        println!("+============================================================+");
        println!();
        println!("Topic: {}", topic);
        println!("Model: {}", config.model.name);
        println!();
    }

    let result = if cli.quiet {
        use_case.execute(topic).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(topic, &progress).await
    };

    let run = match result {
        Ok(run) => run,
        Err(e) => {
            if cli.verbose > 0 {
                eprint!("{}", ConsoleFormatter::format_system_stats(&use_case.system_stats()));
            }
            return Err(e.into());
        }
    };

    println!("{}", render(ExhibitionView::from(&run), output));
    if cli.verbose > 0 || output == OutputFormat::Full {
        println!(
            "{}",
            ConsoleFormatter::format_system_stats(&use_case.system_stats())
        );
    }

    Ok(())
}

fn render(view: ExhibitionView<'_>, output: OutputFormat) -> String {
    match output {
        OutputFormat::Summary => ConsoleFormatter::format_summary(view),
        OutputFormat::Full => ConsoleFormatter::format(view),
        OutputFormat::Json => ConsoleFormatter::format_json(view),
    }
}
