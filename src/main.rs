use std::sync::Arc;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing::info;

use device_tray::adapters::{LogSurface, ReqwestHttpClient, SystemBrowser, TracingReporter};
use device_tray::cli::{parse_args, run_cli_command, VERSION};
use device_tray::config::AgentConfig;
use device_tray::reconciler::Reconciler;
use device_tray::status::DeviceStatusClient;
use device_tray::token::FileTokenStore;
use device_tray::traits::{ErrorReporter, LoopKind, TokenSource};

fn main() -> Result<()> {
    if run_cli_command(parse_args(std::env::args())) {
        return Ok(());
    }

    color_eyre::install()?;

    let log_file = device_tray::logging::init();
    info!(version = VERSION, log_file = ?log_file, "device-tray starting");

    let config = AgentConfig::from_env().wrap_err("invalid configuration")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;

    runtime.block_on(run(config))
}

async fn run(config: AgentConfig) -> Result<()> {
    let reporter: Arc<dyn ErrorReporter> = Arc::new(TracingReporter);

    let tokens = Arc::new(FileTokenStore::new(&config.token_path));
    if let Err(err) = tokens.read().await {
        // The authentication loop keeps retrying; the file may appear later.
        reporter.report(LoopKind::Startup, &err.into());
    }

    let http = ReqwestHttpClient::from_transport(&config.transport)
        .wrap_err("failed to build HTTP client")?;
    let client = Arc::new(DeviceStatusClient::new(http, &config.server_url));

    let reconciler = Reconciler::builder(tokens, client, Arc::new(LogSurface::new()))
        .with_intervals(config.intervals)
        .with_reporter(reporter)
        .with_browser(Arc::new(SystemBrowser))
        .with_label_style(config.label_style)
        .build()
        .wrap_err("invalid reconciler settings")?;
    let handle = reconciler.start();

    tokio::signal::ctrl_c()
        .await
        .wrap_err("failed to listen for shutdown signal")?;

    info!("shutdown requested");
    handle.shutdown();
    Ok(())
}
