use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use onboard_ai::config::AppConfig;
use onboard_ai::error::AppError;
use onboard_ai::telemetry;
use onboard_ai::workflows::admin::{
    admin_router, AdminDirectory, AdminPanelService, HttpAdminClient, SessionGate,
};
use onboard_ai::workflows::onboarding::lookup::RestCountriesClient;
use onboard_ai::workflows::onboarding::{
    onboarding_router, FileSnapshotStore, HttpIntakeClient, OnboardingService, WizardController,
    WizardStep,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Onboarding Intake Orchestrator",
    about = "Run the business onboarding wizard service and admin review panel",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the onboarding wizard state from the command line
    Wizard {
        #[command(subcommand)]
        command: WizardCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum WizardCommand {
    /// Rehydrate a saved form snapshot and report per-step validity
    Review(ReviewArgs),
}

#[derive(Args, Debug)]
struct ReviewArgs {
    /// Snapshot file to review (defaults to the configured path)
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Wizard {
            command: WizardCommand::Review(args),
        } => run_wizard_review(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let intake = Arc::new(HttpIntakeClient::new(config.backend.base_url.as_str())?);
    let countries = Arc::new(RestCountriesClient::new()?);
    let onboarding = Arc::new(OnboardingService::new(intake, countries));

    let admin_client = Arc::new(HttpAdminClient::new(config.backend.base_url.as_str())?);
    let ledger = Arc::new(FileSnapshotStore::new(&config.storage.ledger_path));
    let admin = Arc::new(AdminPanelService {
        directory: AdminDirectory::new(admin_client.clone(), ledger),
        sessions: SessionGate::new(admin_client),
    });

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(onboarding_router(onboarding))
        .merge(admin_router(admin))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "onboarding intake orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_wizard_review(args: ReviewArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = args
        .snapshot
        .unwrap_or_else(|| config.storage.snapshot_path.clone());

    let store = FileSnapshotStore::new(&path);
    let controller = WizardController::new(store);
    let reports = controller.review();

    println!("Onboarding wizard review");
    println!("Snapshot: {}", path.display());

    let mut complete = 0usize;
    for (index, report) in reports.iter().enumerate() {
        if report.is_valid() {
            complete += 1;
            println!("{}. {} — complete", index + 1, report.step.label());
        } else {
            println!("{}. {} — incomplete", index + 1, report.step.label());
            for (field, message) in &report.errors {
                println!("   - {field}: {message}");
            }
        }
    }

    println!(
        "\n{complete}/{} steps complete{}",
        WizardStep::ordered().len(),
        if complete == WizardStep::ordered().len() {
            "; ready to submit"
        } else {
            ""
        }
    );

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
