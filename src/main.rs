//! Alarm Keeper - a local service that plays, vibrates and auto-stops alarms
//!
//! This is the main entry point for the alarm-keeper application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use alarm_keeper::{
    alarm::AlarmManager,
    api::create_router,
    config::Config,
    services::{CommandHaptics, CommandPlayer, DirectoryResolver},
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("alarm_keeper={},tower_http=info", config.log_level()))
        .init();

    info!("Starting alarm-keeper v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, sounds={}, player={}, auto-stop={}min",
        config.host,
        config.port,
        config.sounds_dir.display(),
        config.player,
        config.auto_stop_minutes
    );

    if !config.sounds_dir.is_dir() {
        warn!(
            "Sound directory {} does not exist, every alarm sound will be missing",
            config.sounds_dir.display()
        );
    }

    let alarms = AlarmManager::new(
        Arc::new(DirectoryResolver::new(&config.sounds_dir)),
        Arc::new(CommandPlayer::new(&config.player, config.player_args.clone())),
        Arc::new(CommandHaptics::new(
            config.haptic_command.clone(),
            config.haptic_args.clone(),
        )),
        config.manager_config(),
    );

    // Create application state
    let state = Arc::new(AppState::new(alarms.clone(), config.port, config.host.clone()));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /alarms/:id/sound     - Start or replace an alarm sound");
    info!("  POST   /alarms/:id/vibration - Start an alarm vibration");
    info!("  DELETE /alarms/:id           - Stop one alarm");
    info!("  DELETE /alarms               - Stop every alarm");
    info!("  POST   /feedback/sound       - Play the feedback sound");
    info!("  POST   /feedback/vibration   - Single haptic pulse");
    info!("  GET    /status               - List active alarms");
    info!("  GET    /health               - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    let outcome = tokio::select! {
        result = server => result.map_err(anyhow::Error::from),
        result = shutdown_signal() => {
            if result.is_ok() {
                info!("Shutdown signal received");
            }
            result.map_err(|e| anyhow::anyhow!("Failed to install signal handler: {}", e))
        }
    };

    // No player process may outlive the service
    alarms.stop_all();
    outcome?;

    info!("Server shutdown complete");
    Ok(())
}
