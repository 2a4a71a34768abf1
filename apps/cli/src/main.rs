use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appointment_cell::AppointmentsApi;
use auth_cell::{AuthService, PatientsApi, SessionService};
use reminder_cell::{LogSink, ReminderConfig, ReminderScheduler, SeenSetStore};
use shared_config::AppConfig;
use shared_gateway::ApiClient;
use shared_storage::FileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cuida Fácil client");

    // Load configuration
    let config = AppConfig::from_env();

    let store = Arc::new(FileStore::new(&config.storage_path));
    let client = Arc::new(ApiClient::new(&config));

    let session = SessionService::new(store.clone());
    let auth = AuthService::new(PatientsApi::new(client.clone()), session.clone());

    // Resume the stored session, or log in with the configured credentials.
    let patient = match session.current_patient().await? {
        Some(patient) => {
            info!("Resuming session for {}", patient.name);
            patient
        }
        None => {
            let identifier = std::env::var("LOGIN_IDENTIFIER")
                .context("no stored session and LOGIN_IDENTIFIER not set")?;
            let password = std::env::var("LOGIN_PASSWORD")
                .context("no stored session and LOGIN_PASSWORD not set")?;
            auth.login(&identifier, &password).await?
        }
    };

    let scheduler = ReminderScheduler::new(
        AppointmentsApi::new(client),
        SeenSetStore::new(store),
        Arc::new(LogSink),
        patient.id,
        ReminderConfig::from_app_config(&config),
    );
    let handle = scheduler.start().await;

    info!(
        "Reminder scheduler running for {}; press Ctrl-C to exit",
        patient.name
    );
    signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    // The poll task must never outlive the session.
    handle.stop().await;
    info!("Shutdown complete");

    Ok(())
}
