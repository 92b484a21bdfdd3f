use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use speakscore::application::ports::JobQueue;
use speakscore::application::services::{
    GradingDispatcher, GradingService, GradingWorker, IntakeService,
};
use speakscore::infrastructure::audio::MultimodalTranscriptionEngine;
use speakscore::infrastructure::grading::JobSubmitterFactory;
use speakscore::infrastructure::llm::OpenAiChatClient;
use speakscore::infrastructure::observability::{TracingConfig, init_tracing};
use speakscore::infrastructure::persistence::JobQueueFactory;
use speakscore::presentation::config::{QueueBackend, SubmissionMode};
use speakscore::presentation::{
    Environment, GradingState, IntakeState, Settings, create_grading_router, create_intake_router,
};

#[derive(Parser)]
#[command(name = "speakscore")]
#[command(about = "Speaking assessment: audio intake, transcription and AI grading")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the public audio intake API
    Intake,
    /// Serve the internal grading API with embedded workers
    Grading,
    /// Run standalone grading workers against the configured queue
    Worker {
        /// Number of concurrent workers
        #[arg(long, default_value_t = 1)]
        workers: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    let service = match cli.command {
        Commands::Intake => "speakscore-intake",
        Commands::Grading => "speakscore-grading",
        Commands::Worker { .. } => "speakscore-worker",
    };
    init_tracing(
        &TracingConfig::for_service(service)
            .with_level(&settings.logging.level)
            .with_json(settings.logging.enable_json),
    );

    let shutdown = CancellationToken::new();
    spawn_shutdown_signal(shutdown.clone());

    match cli.command {
        Commands::Intake => run_intake(settings, shutdown).await,
        Commands::Grading => run_grading(settings, shutdown).await,
        Commands::Worker { workers } => run_workers(settings, workers, shutdown).await,
    }
}

async fn run_intake(settings: Settings, shutdown: CancellationToken) -> anyhow::Result<()> {
    let transcription = &settings.transcription;
    let engine = Arc::new(MultimodalTranscriptionEngine::new(
        &transcription.base_url,
        &transcription.api_key,
        &transcription.model,
        transcription.timeout(),
    ));

    let mut workers = Vec::new();
    let job_queue = match settings.intake.submission_mode {
        SubmissionMode::Sync => None,
        SubmissionMode::Queued => {
            let queue = JobQueueFactory::create(&settings.queue).await?;
            // A memory queue is only visible to this process, so it needs its own consumer.
            if settings.queue.backend == QueueBackend::Memory {
                workers = spawn_workers(&settings, Arc::clone(&queue), 1, &shutdown);
            }
            Some(queue)
        }
    };

    let submitter = JobSubmitterFactory::create(&settings.intake, job_queue.clone())?;
    tracing::info!(
        mode = ?settings.intake.submission_mode,
        grading_url = %settings.intake.grading_url,
        "Intake submission configured"
    );

    let state = IntakeState {
        intake_service: Arc::new(IntakeService::new(engine, submitter)),
        job_queue,
        default_format: transcription.default_format,
        max_upload_bytes: settings.intake.max_upload_bytes,
    };

    serve(
        create_intake_router(state),
        &settings.server.host,
        settings.server.intake_port,
        shutdown,
    )
    .await?;

    join_workers(workers).await;
    Ok(())
}

async fn run_grading(settings: Settings, shutdown: CancellationToken) -> anyhow::Result<()> {
    let queue = JobQueueFactory::create(&settings.queue).await?;
    let workers = spawn_workers(
        &settings,
        Arc::clone(&queue),
        settings.grading.embedded_workers,
        &shutdown,
    );

    let state = GradingState {
        dispatcher: Arc::new(GradingDispatcher::new(queue)),
    };

    serve(
        create_grading_router(state),
        &settings.server.host,
        settings.server.grading_port,
        shutdown,
    )
    .await?;

    join_workers(workers).await;
    Ok(())
}

async fn run_workers(
    settings: Settings,
    count: usize,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    if settings.queue.backend == QueueBackend::Memory {
        tracing::warn!("Standalone workers on an in-memory queue will never receive jobs");
    }

    let queue = JobQueueFactory::create(&settings.queue).await?;
    let workers = spawn_workers(&settings, queue, count.max(1), &shutdown);

    shutdown.cancelled().await;
    join_workers(workers).await;
    Ok(())
}

fn spawn_workers(
    settings: &Settings,
    queue: Arc<dyn JobQueue>,
    count: usize,
    shutdown: &CancellationToken,
) -> Vec<JoinHandle<()>> {
    let grading = &settings.grading;
    let llm_client = Arc::new(OpenAiChatClient::new(
        &grading.base_url,
        &grading.api_key,
        &grading.model,
        grading.temperature,
        grading.timeout(),
    ));
    let grading_service = Arc::new(GradingService::new(llm_client));

    tracing::info!(count, queue = %queue.name(), model = %grading.model, "Starting grading workers");

    (0..count)
        .map(|i| {
            let worker = GradingWorker::new(
                format!("grading-worker-{}", i),
                Arc::clone(&queue),
                Arc::clone(&grading_service),
                settings.queue.poll_interval(),
                settings.queue.visibility_timeout(),
            );
            tokio::spawn(worker.run(shutdown.clone()))
        })
        .collect()
}

async fn join_workers(workers: Vec<JoinHandle<()>>) {
    for handle in workers {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Grading worker task panicked");
        }
    }
}

async fn serve(
    router: axum::Router,
    host: &str,
    port: u16,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    Ok(())
}

fn spawn_shutdown_signal(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                shutdown.cancel();
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
        }
    });
}
