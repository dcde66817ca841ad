use clap::Parser;
use code_exec::ResourceLimits;
use code_exec_server::{create_app, run_server};
use codepad::{build_state, AppConfig, RuntimeSettings};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, default_value = "0.0.0.0:5000")]
    addr: SocketAddr,

    /// Maximum number of concurrent executions
    #[arg(
        short,
        long,
        default_value = "10",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    max_concurrent: usize,

    /// CPU time limit per submission in seconds
    #[arg(long, default_value = "5")]
    cpu_time_limit: u32,

    /// Memory limit per submission in kilobytes
    #[arg(long, default_value = "128000")]
    memory_limit: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let settings = RuntimeSettings {
        max_concurrent_executions: args.max_concurrent,
        resource_limits: ResourceLimits {
            cpu_time: args.cpu_time_limit,
            memory: args.memory_limit,
        },
    };

    let state = build_state(config, settings)?;
    let shutdown = state.shutdown.clone();

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested");
            }
            shutdown.cancel();
        }
    });

    run_server(create_app(state), args.addr, shutdown).await?;

    Ok(())
}
