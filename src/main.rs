use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use irisd::{create_router, AppState, LabelMap, MetricsRegistry, ModelHolder};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the serialized model artifact
    #[arg(short, long, default_value = "models/iris-v1.json", env = "IRISD_MODEL")]
    model: PathBuf,

    /// Address to bind the HTTP server on
    #[arg(short, long, default_value = "0.0.0.0:5000", env = "IRISD_BIND")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("irisd v{} starting", env!("CARGO_PKG_VERSION"));

    let holder = Arc::new(ModelHolder::load(&args.model));
    if !holder.is_loaded() {
        warn!("serving without a model; /predict will answer 503 until an artifact is installed and the process restarted");
    }

    let state = AppState::new(holder, LabelMap::iris(), Arc::new(MetricsRegistry::new()));

    // Permissive CORS so the browser dashboard can call the API from
    // another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = create_router(state).layer(cors);

    let listener = TcpListener::bind(args.bind).await?;
    info!("listening on {}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("irisd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
