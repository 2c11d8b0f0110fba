//! `render` and `watch` commands.

use crate::error::CliResult;
use folio_core::service::PublishReport;
use folio_core::{publish_site, CacheWatcher, DocumentCache, RemoteSource};
use log::info;
use std::path::Path;
use std::time::Duration;

const MIN_POLL_INTERVAL_MS: u64 = 50;

pub async fn render<C: DocumentCache, R: RemoteSource>(
    cache: &C,
    source: &R,
    cache_key: &str,
    output: &Path,
) -> CliResult<()> {
    let report = publish_site(cache, source, cache_key, output).await?;
    print_report(&report);
    Ok(())
}

/// Renders once, then again after every cache revision change until Ctrl-C.
pub async fn watch<C: DocumentCache, R: RemoteSource>(
    cache: &C,
    source: &R,
    cache_key: &str,
    output: &Path,
    interval_ms: u64,
) -> CliResult<()> {
    let mut watcher = CacheWatcher::new(cache, cache_key)?;
    render(cache, source, cache_key, output).await?;

    let mut ticker =
        tokio::time::interval(Duration::from_millis(interval_ms.max(MIN_POLL_INTERVAL_MS)));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("event=watch_stop module=cli status=ok key={}", cache_key);
                return Ok(());
            }
            _ = ticker.tick() => {
                if watcher.poll(cache)? {
                    render(cache, source, cache_key, output).await?;
                }
            }
        }
    }
}

fn print_report(report: &PublishReport) {
    println!(
        "rendered {} ({} records, origin={})",
        report.output.display(),
        report.records,
        report.origin.as_str()
    );
}
