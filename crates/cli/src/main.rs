mod bench;
mod cli;

use anyhow::Context;
use clap::Parser;
use seqdb_executor::Executor;
use seqdb_server::{build_runtime, Client, Server, ServerConfig};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Command, CommandLine, ConnArgs, ServeArgs};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CommandLine::parse();
    match args.command {
        Command::Serve(serve_args) => serve(serve_args),
        command => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            rt.block_on(run_client(command))
        }
    }
}

/// Merge the config file (or defaults) with command line overrides
fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }
    if let Some(workers) = args.workers {
        config.worker_threads = workers;
    }
    if let Some(records) = args.records {
        config.store.initial_records = records;
    }
    if let Some(modulus) = args.modulus {
        config.store.modulus = modulus;
    }
    if let Some(seed) = args.seed {
        config.store.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let executor = Executor::populate(config.store.clone()).context("failed to build store")?;

    let rt = build_runtime(config.worker_threads)?;
    info!(workers = config.worker_threads, "created runtime");

    rt.block_on(async move {
        let server = Server::bind(&config, executor)
            .await
            .with_context(|| format!("failed to bind {}", config.listen_addr))?;
        server
            .serve_with_shutdown(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received");
                }
            })
            .await?;
        Ok(())
    })
}

async fn connect(conn: &ConnArgs) -> anyhow::Result<Client> {
    Client::connect(conn.addr.as_str())
        .await
        .with_context(|| format!("failed to connect to {}", conn.addr))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_client(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve(_) => anyhow::bail!("serve runs on its own runtime"),
        Command::Search { conn, value } => {
            let records = connect(&conn).await?.search(value).await?;
            print_json(&records)
        }
        Command::Add { conn, values } => {
            connect(&conn).await?.add(values).await?;
            Ok(())
        }
        Command::Update { conn, records } => {
            let records = records.into_iter().map(|r| r.0).collect();
            connect(&conn).await?.update(records).await?;
            Ok(())
        }
        Command::Delete { conn, indexes } => {
            connect(&conn).await?.delete(indexes).await?;
            Ok(())
        }
        Command::Ping { conn } => {
            println!("{}", connect(&conn).await?.ping().await?);
            Ok(())
        }
        Command::Info { conn } => {
            let info = connect(&conn).await?.info().await?;
            print_json(&info)
        }
        Command::Bench(args) => {
            let summary = bench::run(args).await?;
            anyhow::ensure!(
                summary.failed_workers == 0,
                "{} bench workers failed",
                summary.failed_workers
            );
            Ok(())
        }
    }
}
