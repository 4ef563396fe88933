use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use yansi::Paint;

use crate::config;
use crate::error::SeedError;
use crate::http;

/// Polling parameters for the availability prober.
///
/// One attempt is the full double-GET sequence; `max_attempts: None`
/// keeps polling until the process is killed.
#[derive(Debug, Clone, Copy)]
pub struct ProbeOptions {
    pub interval: Duration,
    pub max_attempts: Option<u64>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(config::DEFAULT_PROBE_INTERVAL_SECS),
            max_attempts: None,
        }
    }
}

/// Block until `url` answers two consecutive GETs, `opts.interval` apart.
///
/// A failure anywhere in the two-call sequence restarts the whole sequence
/// after the same fixed delay. There is no backoff.
pub async fn wait_for_backend(
    client: &reqwest::Client,
    url: &str,
    opts: ProbeOptions,
) -> Result<(), SeedError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        spinner.set_message(format!("Waiting for backend connection... (attempt {})", attempts));

        match probe_once(client, url, opts.interval).await {
            Ok(()) => {
                spinner.finish_and_clear();
                tracing::info!(%url, attempts, "backend reachable");
                println!(
                    "{}",
                    Paint::new(format!("+ Backend connection established on {}.", url)).green()
                );
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%url, attempts, error = %e, "probe attempt failed");
                if let Some(max) = opts.max_attempts {
                    if attempts >= max {
                        spinner.finish_and_clear();
                        return Err(SeedError::BackendUnreachable { attempts });
                    }
                }
                tokio::time::sleep(opts.interval).await;
            }
        }
    }
}

/// The double-success check: two independent GETs with the fixed delay in
/// between. Both must succeed.
async fn probe_once(
    client: &reqwest::Client,
    url: &str,
    interval: Duration,
) -> Result<(), SeedError> {
    http::fetch(client, url, false).await?;
    tokio::time::sleep(interval).await;
    http::fetch(client, url, false).await?;
    Ok(())
}
