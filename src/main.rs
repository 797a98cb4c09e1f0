//! Authorization service entry point.

use logistics_authz::{
    authz::{AuthzGuard, PermissionMatrix},
    config::AppConfig,
    handlers::health,
    middleware::AppState,
    routes,
    session::{JwtService, JwtSessionProvider},
    telemetry,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("logistics-authz {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // .env cascade for development; production sets real env vars.
    if let Ok(profile) = std::env::var("AUTHZ_ENV") {
        dotenv::from_filename(format!(".env.{}", profile)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    // 1. Load configuration.
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. Initialize logging and metrics.
    telemetry::init_telemetry(&config);
    telemetry::init_metrics();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Authorization service starting..."
    );

    // 3. Build the policy core: one immutable matrix, one guard.
    let matrix = Arc::new(PermissionMatrix::platform_default());
    let jwt_service = JwtService::from_config(&config)?;
    let guard = Arc::new(AuthzGuard::new(
        matrix.clone(),
        JwtSessionProvider::new(jwt_service),
    ));

    tracing::info!(
        admin_roles = matrix.role_count(),
        "Permission matrix loaded"
    );

    // 4. Serve.
    let state = Arc::new(AppState {
        config: config.clone(),
        guard,
    });
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.server.addr).await?;
    tracing::info!(addr = %config.server.addr, "Listening");

    let shutdown_timeout = Duration::from_secs(config.server.graceful_shutdown_timeout_secs);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolve when a shutdown signal arrives, then give in-flight requests the
/// configured drain window.
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .unwrap_or_else(|e| tracing::error!("Failed to listen for ctrl-c: {}", e));
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!(
        drain_secs = timeout.as_secs(),
        "Shutdown signal received, draining"
    );
    tokio::time::sleep(timeout).await;
}

fn print_help() {
    println!("logistics-authz - authorization service");
    println!();
    println!("USAGE:");
    println!("    logistics-authz [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    --version    Print version information");
    println!("    --help       Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    All configuration is read from AUTHZ_-prefixed environment");
    println!("    variables, e.g. AUTHZ_SERVER__ADDR=0.0.0.0:3000");
}
