use std::{io, sync::OnceLock};

use application::{Args, Config, Service};
use service::infra::{postgres, Postgres};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

postgres::embed_migrations!("../migrations");

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    if start().await.is_err() {
        std::process::exit(1);
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().unwrap_or_else(|e| e.exit());

    let Config {
        postgres,
        service,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let postgres_config = postgres.into();
    let mut postgres = Postgres::new(&postgres_config).map_err(|e| {
        log::error!("failed to initialize `Postgres` client: {e}");
    })?;

    migrations::runner()
        .run_async(&mut postgres)
        .await
        .map_err(|e| {
            log::error!("failed to run database migrations: {e}");
        })?;

    let service = Service::new(service.into(), postgres.clone(), postgres);

    let output = application::execute(&service, command)
        .await
        .map_err(|e| {
            log::error!("{e}");
        })?;
    print!("{output}");

    Ok(())
}
