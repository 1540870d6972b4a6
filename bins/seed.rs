use tracing::{error, info};

use service::auth::AuthConfig;
use service::seed::{seed_defaults, SeedAdmin};

async fn seed(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_and_migrate(&db_cfg).await?;

    let admin = SeedAdmin::from_env();
    let report = seed_defaults(&db, &admin, AuthConfig::from(&cfg.auth)).await?;
    info!(
        event = "seed_completed",
        categories = report.categories,
        services = report.services,
        settings_created = report.settings_created,
        admin = %admin.username,
        "seed completed successfully"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(&cfg.logging.format);

    match seed(cfg).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(event = "seed_failed", error = %e, "seed failed");
            std::process::ExitCode::FAILURE
        }
    }
}
