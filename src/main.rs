use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use taskboard_server::{ServerConfig, TaskboardServer};
use taskboard_settings::{load_settings, load_settings_from_path, Settings};
use taskboard_store::Database;
use taskboard_tasks::{ServiceConfig, TaskService};
use taskboard_telemetry::{init_telemetry, TelemetryConfig};

/// Task manager REST server.
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about)]
struct Args {
    /// Settings file (defaults to ~/.taskboard/settings.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address, overriding settings.
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding settings.
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database file, overriding settings.
    #[arg(long)]
    database: Option<PathBuf>,
}

impl Args {
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(host) = self.host {
            settings.server.host = host;
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(database) = self.database {
            settings.storage.database_path = database;
        }
        settings
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => load_settings_from_path(path),
        None => load_settings(),
    }
    .context("failed to load settings")?;
    let settings = args.apply(settings);

    let telemetry = TelemetryConfig::from_parts(
        &settings.logging.level,
        &settings.logging.modules,
        settings.logging.json,
    )?;
    init_telemetry(&telemetry)?;

    tracing::info!("starting taskboard");

    let db_path = &settings.storage.database_path;
    let db = Database::open(db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    tracing::info!(path = %db_path.display(), "database opened");

    let service = TaskService::new(
        db,
        ServiceConfig {
            default_parent_name: settings.tasks.default_parent_name.clone(),
        },
    );
    let server = TaskboardServer::new(
        ServerConfig {
            host: settings.server.host.clone(),
            port: settings.server.port,
        },
        service,
    );
    let (addr, handle) = server.listen().await.context("failed to bind")?;
    tracing::info!(%addr, "taskboard ready");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl+c")?;

    tracing::info!("shutting down");
    server.shutdown().shutdown();
    handle.await.context("server task panicked")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let args = Args::parse_from([
            "taskboard",
            "--port",
            "9000",
            "--database",
            "/tmp/tb.db",
        ]);
        let settings = args.apply(Settings::default());
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.storage.database_path, PathBuf::from("/tmp/tb.db"));
    }

    #[test]
    fn no_flags_keep_settings() {
        let args = Args::parse_from(["taskboard"]);
        assert_eq!(args.apply(Settings::default()), Settings::default());
    }
}
