//! xpumond - XPU telemetry daemon
//!
//! Serves GPU inventory and per-device telemetry over HTTP by invoking the
//! vendor management tools (`xpumcli`, falling back to `xpu-smi`).
//!
//! Usage:
//!   xpumond [OPTIONS] [config.toml]
//!
//! Without a config file the defaults apply: listen on 0.0.0.0:8000, try
//! `xpumcli` then `xpu-smi` with a 10 second timeout each.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use xpumon_api::{create_router, AppState};
use xpumon_core::DeviceBackend;
use xpumon_smi::XpuSmiBackend;

use crate::config::DaemonConfig;

const DEFAULT_LOG_FILTER: &str = "xpumond=info,xpumon_api=info,xpumon_smi=info";

#[derive(Parser)]
#[command(name = "xpumond", author, version, about = "XPU telemetry daemon")]
struct Args {
    /// Config file (TOML)
    #[arg(env = "XPUMON_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "XPUMON_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "XPUMON_PORT")]
    port: Option<u16>,

    /// Emit JSON log lines
    #[arg(long, env = "XPUMON_LOG_JSON")]
    log_json: bool,
}

impl Args {
    /// Apply command-line overrides over file values
    fn apply(&self, config: &mut DaemonConfig) {
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.log_json {
            config.log.json = true;
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DaemonConfig::load(path)?,
        None => DaemonConfig::default(),
    };
    args.apply(&mut config);

    init_tracing(config.log.json);

    tracing::info!("Starting xpumond (XPU telemetry daemon)");
    match &args.config {
        Some(path) => tracing::info!("Loaded config from: {}", path.display()),
        None => tracing::info!("No config file provided, using defaults"),
    }

    config.validate()?;

    tracing::info!(
        binaries = %config.smi.binaries.join(", "),
        timeout_secs = config.smi.timeout_secs,
        "Vendor tool candidates"
    );

    let backend: Arc<dyn DeviceBackend> = Arc::new(XpuSmiBackend::from_config(&config.smi));
    let mut state = AppState::new(backend);
    if let Some(deadline) = config.server.request_timeout() {
        tracing::info!(deadline_secs = deadline.as_secs(), "Request deadline enabled");
        state = state.with_request_timeout(deadline);
    }

    let app = create_router(state);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_override_file_values() {
        let mut config =
            DaemonConfig::parse("[server]\nbind = \"127.0.0.1\"\nport = 9000").unwrap();
        let args = Args::try_parse_from(["xpumond", "--port", "8100", "--log-json"]).unwrap();

        args.apply(&mut config);

        assert_eq!(config.server.addr(), "127.0.0.1:8100");
        assert!(config.log.json);
    }

    #[test]
    fn positional_config_path() {
        let args =
            Args::try_parse_from(["xpumond", "-b", "127.0.0.2", "/etc/xpumond.toml"]).unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/etc/xpumond.toml")));
        assert_eq!(args.bind.as_deref(), Some("127.0.0.2"));
        assert_eq!(args.port, None);
    }
}
