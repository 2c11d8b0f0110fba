//! `folio` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, open the cache and dispatch one command.
//! - Report failures as a single `error:` line with a non-zero exit code.

mod admin;
mod args;
mod error;
mod site;

use args::{Cli, Command};
use clap::Parser;
use error::CliResult;
use folio_core::{
    default_log_level, init_logging, open_db, AdminSession, DataSource, FolioConfig,
    SqliteDocumentCache,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_exit module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = FolioConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.cache.db_path = db;
    }
    if let Some(source) = cli.source {
        config.data.source = source;
    }
    if let Some(dir) = &config.logging.dir {
        let level = config
            .logging
            .level
            .as_deref()
            .unwrap_or_else(|| default_log_level());
        init_logging(level, dir)?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let conn = open_db(&config.cache.db_path)?;
    let cache = SqliteDocumentCache::new(&conn);
    let source = DataSource::from_location(&config.data.source, config.data.request_timeout())?;

    runtime.block_on(dispatch(cli.command, &config, &cache, &source))
}

async fn dispatch(
    command: Command,
    config: &FolioConfig,
    cache: &SqliteDocumentCache<'_>,
    source: &DataSource,
) -> CliResult<()> {
    let cache_key = config.cache.key.as_str();
    match command {
        Command::Render(args) => {
            let output = args.output.unwrap_or_else(|| config.site.output.clone());
            site::render(cache, source, cache_key, &output).await
        }
        Command::Watch(args) => {
            let output = args.output.unwrap_or_else(|| config.site.output.clone());
            site::watch(cache, source, cache_key, &output, args.interval_ms).await
        }
        Command::Admin(args) => {
            let password = admin::read_password(args.password)?;
            let mut session = AdminSession::new(cache, cache_key, config.admin.password.as_str());
            session.authenticate(&password)?;
            admin::run(&mut session, source, args.action, &config.site.output).await
        }
    }
}
