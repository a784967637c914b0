//! Rental tariffs API, CLI server
//!
//! ```sh
//! # Run with default config (~/.config/rental-tariffs/config.toml)
//! tariff-service
//!
//! # Custom config path
//! tariff-service --config /etc/rental-tariffs/config.toml
//!
//! # Validate config without starting
//! tariff-service --check
//!
//! # Hash a password for a [[security.users]] entry
//! tariff-service --hash-password 's3cret'
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use rental_tariffs::config::{AppConfig, ConfigError, CONFIG_PATH_ENV};
use rental_tariffs::infrastructure::crypto::password::hash_password;
use rental_tariffs::infrastructure::database::redact_url;
use rental_tariffs::server::{init_tracing, ServerHandle, ServerOptions};

/// Rental tariffs API: vehicle listing and daily-rate maintenance.
#[derive(Parser, Debug)]
#[command(
    name = "tariff-service",
    version,
    about = "REST API for rental fleet daily-rate tariffs",
    long_about = "Serves GET/POST /tariffs and GET /cars over the fleet database.\n\n\
                  Default config: ~/.config/rental-tariffs/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Print a bcrypt hash of the given password and exit.
    #[arg(long, value_name = "PASSWORD")]
    hash_password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(ref password) = cli.hash_password {
        println!("{}", hash_password(password)?);
        return Ok(());
    }

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(rental_tariffs::default_config_path);

    let (mut config, loaded) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, true),
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound && !cli.check => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            (cfg, false)
        }
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    if loaded {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("No config file at {}, using defaults", config_path.display());
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file  : {}", config_path.display());
        println!("   API address  : {}", config.api_address());
        println!("   Route prefix : {}", config.server.route_prefix);
        println!("   Database     : {}", redact_url(&config.database.connection_url()));
        println!("   Tariff table : {}", config.database.store_schema().tariffs_table);
        println!("   Users        : {}", config.security.users.len());
        println!("   Log level    : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e);
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
