use std::sync::Arc;

use httpsnotif_schema::{ModelConfig, SchemaState};
use httpsnotif_service::{build_router, AppState, ReceiverConfig};
use tracing::{info, warn};

use crate::cmd::{capability_set, ServeArgs};
use crate::exit::{io_error, CliError, CliResult, INTERNAL, SUCCESS};

pub fn run(args: ServeArgs) -> CliResult<i32> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|err| CliError::new(INTERNAL, format!("runtime setup failed: {err}")))?;
    runtime.block_on(serve(args))
}

async fn serve(args: ServeArgs) -> CliResult<i32> {
    let capabilities = capability_set(&args.encodings);
    if capabilities.is_empty() {
        warn!("no encodings enabled; every relay notification will be rejected");
    }

    let state = Arc::new(AppState::new(capabilities));

    // The load outcome is published before the listener starts accepting,
    // so no handler ever observes an unset slot in single-process use. A
    // failed load degrades relay notifications; it does not abort the server.
    let schema_state = SchemaState::load(&args.schema, ModelConfig::default());
    state.schema().publish(schema_state);

    let config = ReceiverConfig {
        max_body_size: args.max_body_size,
    };
    let router = build_router(state.clone(), &config);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .map_err(|err| io_error("bind failed", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| io_error("bind failed", err))?;

    info!("listening on {addr}");
    info!(
        capabilities = ?state.capabilities().urns(),
        schema_ready = state.schema().model().is_some(),
        "receiver ready"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| io_error("server failed", err))?;

    info!("receiver stopped");
    Ok(SUCCESS)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
