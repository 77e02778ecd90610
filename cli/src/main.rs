//! CLI entrypoint for answer-quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use quorum_application::{RunEnsembleInput, RunEnsembleUseCase};
use quorum_domain::{Attachment, AttachmentSet};
use quorum_infrastructure::{
    BackendRegistry, ConfigLoader, CsvSummarizer, FileConfig, ProviderCredentials, Severity,
};
use quorum_presentation::{
    AppState, Cli, Command, ConsoleFormatter, ProgressReporter, create_router, serve,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The service logs its lifecycle by default; one-shot commands stay quiet
    let level = cli
        .verbose
        .saturating_add(u8::from(matches!(cli.command, Command::Serve { .. })));
    let _log_guard = init_logging(level, cli.log_dir.as_deref());

    info!("Starting answer-quorum");

    let config = load_config(&cli)?;

    // === Dependency Injection ===
    let credentials = ProviderCredentials::from_env(&config.providers);
    let registry = BackendRegistry::from_config(&config.providers, &credentials)?;

    match cli.command {
        Command::Config => {
            for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
                println!("{}", line);
            }
            let reviewer = registry.reviewer();
            print!(
                "{}",
                ConsoleFormatter::format_backends(
                    &registry.active_backends(),
                    reviewer.model(),
                    reviewer.is_configured()
                )
            );
            Ok(())
        }
        Command::Serve { bind } => {
            let addr: SocketAddr = match bind {
                Some(addr) => addr,
                None => config
                    .server
                    .bind
                    .parse()
                    .with_context(|| format!("Invalid server.bind '{}'", config.server.bind))?,
            };
            let ensemble = build_ensemble(&config, &registry);
            let router = create_router(AppState::new(ensemble), config.server.max_upload_bytes);
            serve(router, addr).await?;
            info!("Server stopped");
            Ok(())
        }
        Command::Ask {
            files,
            quiet,
            show_candidates,
        } => {
            let ensemble = build_ensemble(&config, &registry);
            let attachments = read_attachments(&files).await?;
            let input = RunEnsembleInput::from_attachments(attachments)?;

            let output = if quiet {
                ensemble.execute(input).await?
            } else {
                let progress = ProgressReporter::new();
                ensemble.execute_with_progress(input, &progress).await?
            };

            if show_candidates {
                print!("{}", ConsoleFormatter::format_detailed(&output));
            } else {
                print!("{}", ConsoleFormatter::format_answer(&output));
            }
            Ok(())
        }
    }
}

/// Install the subscriber; `RUST_LOG` wins over the `-v` count.
///
/// The returned guard flushes the file appender on drop.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "answer-quorum.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
        }
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let mut invalid = false;
    for issue in config.validate() {
        match issue.severity {
            Severity::Error => {
                error!("Config: {}", issue);
                invalid = true;
            }
            Severity::Warning => warn!("Config: {}", issue),
        }
    }
    if invalid {
        bail!("Invalid configuration");
    }

    Ok(config)
}

fn build_ensemble(config: &FileConfig, registry: &BackendRegistry) -> Arc<RunEnsembleUseCase> {
    let reviewer = registry.reviewer();
    if !reviewer.is_configured() {
        warn!(
            model = %reviewer.model(),
            "Reviewer has no credential; every request will fail at adjudication"
        );
    }

    Arc::new(RunEnsembleUseCase::new(
        registry.backends(),
        Arc::new(CsvSummarizer::new(config.ensemble.preview_rows)),
        reviewer,
        config.ensemble.to_ensemble_config(),
    ))
}

/// Read local files in argument order, named by their file name
async fn read_attachments(files: &[PathBuf]) -> Result<AttachmentSet> {
    let mut attachments = AttachmentSet::default();
    for path in files {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        attachments.push(Attachment::new(name, bytes));
    }
    Ok(attachments)
}
