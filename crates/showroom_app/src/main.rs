//! Showroom - interactive category drill-down and media gallery engine
//!
//! Main entry point for the headless driver.

mod app;

use anyhow::Result;

fn main() -> Result<()> {
    // Initialize logging and panic hook first
    showroom_log::init()?;

    // Load configuration
    let config = showroom_core::EngineConfig::load().unwrap_or_default();

    if let Err(e) = showroom_log::cleanup_old_logs(config.general.log_retention_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Showroom starting...");

    // Run the driver loop
    app::run(config)
}
