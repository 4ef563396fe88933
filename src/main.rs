use std::time::Duration;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use ft_seed::config::{self, DEFAULT_PROBE_INTERVAL_SECS};
use ft_seed::error::SeedError;
use ft_seed::probe::{self, ProbeOptions};
use ft_seed::{http, provision, report};

#[derive(Parser)]
#[command(
    name = "ft-seed",
    author,
    version,
    about = "Seed the ft_transcendance backend with demo user accounts",
    long_about = r#"ft-seed — populate a local ft_transcendance backend with demo users.

Running with no arguments waits for the backend to come up, provisions the
four demo accounts (alice, bob, chloe, dante) and prints the resulting ids
and access tokens. Already-existing accounts are reused, not duplicated.

Examples:
  1) Seed a locally running stack:
      ft-seed
  2) Point at a non-default backend and give up after 30 attempts:
      ft-seed --api-url http://localhost:4001 --max-attempts 30
"#
)]
struct Cli {
    /// Base URL probed for availability [default: http://localhost:3000, env: SEED_BACKEND_URL]
    #[arg(long)]
    backend_url: Option<String>,
    /// Base URL of the user/auth service [default: http://localhost:3001, env: SEED_API_URL]
    #[arg(long)]
    api_url: Option<String>,
    /// Seconds between availability probe attempts
    #[arg(long, default_value_t = DEFAULT_PROBE_INTERVAL_SECS)]
    interval_secs: u64,
    /// Stop probing after this many failed attempts (default: poll forever)
    #[arg(long)]
    max_attempts: Option<u64>,
    /// Path to .env file
    #[arg(long)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long)]
    silent: bool,
}

async fn run(cli: &Cli) -> Result<(), SeedError> {
    config::load_env_file(cli.env_file.as_deref());

    // Explicit flags win over the environment, which wins over the defaults
    let backend_url = config::resolve_backend_url(cli.backend_url.as_deref());
    let api_url = config::resolve_api_url(cli.api_url.as_deref());

    let client = http::build_client();
    let opts = ProbeOptions {
        interval: Duration::from_secs(cli.interval_secs),
        max_attempts: cli.max_attempts,
    };

    report::print_header(&format!(
        "Establishing ft_transcendance backend connection ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    probe::wait_for_backend(&client, &backend_url, opts).await?;

    report::print_header("Creating Users");
    let registry = provision::provision_all(&client, &api_url).await;
    tracing::info!(provisioned = registry.len(), "provisioning finished");

    println!();
    report::print_users(&registry);
    report::print_summary(&registry);
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    if cli.silent {
        http::set_silent(true);
    }

    // Any error reaching this level is reported and the process still exits
    // normally; partial provisioning already printed what it could.
    if let Err(e) = run(&cli).await {
        tracing::error!(%e, "seeding aborted");
        println!("{}", yansi::Paint::new(format!("Error: {}", e)).red());
    }
}
