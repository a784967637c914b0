//! Reusable service runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, connection
//! pool, services, REST API and graceful shutdown. The CLI binary is a thin
//! wrapper around it, and tests can start it in-process.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{IdentityService, RoleCapabilityPolicy, TariffService};
use crate::config::AppConfig;
use crate::infrastructure::database::redact_url;
use crate::infrastructure::{init_database, SeaOrmRepositoryProvider};
use crate::interfaces::{create_api_router, ApiContext};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Install the Prometheus recorder and serve `/metrics` (default: true).
    pub enable_metrics: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            enable_metrics: true,
        }
    }
}

/// The global recorder can only be installed once per process, so a
/// restart within the same process reuses it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
                None
            }
        })
        .clone()
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// ```rust,no_run
/// use rental_tariffs::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Port the API is listening on (useful when configured as `0`).
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service.
    ///
    /// 1. Validate the configuration
    /// 2. Install the Prometheus recorder (if enabled)
    /// 3. Connect the pool
    /// 4. Build repositories, services and the router
    /// 5. Bind the listener and serve until shutdown is signalled
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let config = opts.config;
        config.validate()?;

        info!("Starting rental tariff service...");

        let metrics = if opts.enable_metrics {
            prometheus_handle()
        } else {
            None
        };

        // ── Database ───────────────────────────────────────────
        let db_config = config.database_config();
        info!("Database: {}", redact_url(&db_config.url));
        let db = init_database(&db_config).await?;

        let schema = config.database.store_schema();
        info!(
            vehicles = schema.vehicles_table.as_str(),
            tariffs = schema.tariffs_table.as_str(),
            "Fleet tables"
        );

        // ── Services ───────────────────────────────────────────
        let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone(), schema));
        let tariffs = Arc::new(TariffService::new(repos, Arc::new(RoleCapabilityPolicy)));

        let jwt_config = config.jwt_config();
        if config.security.jwt_secret.is_empty() {
            warn!("security.jwt_secret is unset; using a random secret, issued tokens end with this process");
        }
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );
        if config.security.users.is_empty() {
            warn!("No users configured in [security.users]; every API call will be rejected");
        }
        let identity = Arc::new(IdentityService::new(
            config.security.users.clone(),
            jwt_config,
        ));

        // ── REST API ───────────────────────────────────────────
        let router = create_api_router(ApiContext {
            tariffs,
            identity,
            db: db.clone(),
            metrics,
            route_prefix: config.server.route_prefix.clone(),
        });

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(config.api_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!(
            "Routes under http://{}{}",
            local_addr, config.server.route_prefix
        );
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config,
            api_port: local_addr.port(),
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until the API stops, then close the pool.
    ///
    /// Once shutdown is signalled, in-flight requests get
    /// `server.shutdown_timeout` seconds before the server task is aborted.
    pub async fn wait(self) {
        let grace = Duration::from_secs(self.shutdown.timeout_secs());
        let signal = self.shutdown.signal();
        let mut api_task = self.api_task;

        tokio::select! {
            result = &mut api_task => match result {
                Ok(()) => info!("REST API server stopped"),
                Err(e) => error!("REST API server task panicked: {}", e),
            },
            _ = async {
                signal.wait().await;
                tokio::time::sleep(grace).await;
            } => {
                warn!("Graceful shutdown timed out after {}s, aborting", grace.as_secs());
                api_task.abort();
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once at process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
