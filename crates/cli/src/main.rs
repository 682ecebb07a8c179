use clap::{Parser, Subcommand};
use iterdns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "iterdns")]
#[command(version)]
#[command(about = "Iterative IPv4 resolver with a persistent record cache")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Record cache database path (`:memory:` for an in-process cache)
    #[arg(long, global = true)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// UDP port queried on every nameserver
    #[arg(long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the IPv4 address of each domain and print it
    Resolve {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Run the cache expunge and domain monitor jobs until Ctrl-C
    Monitor,
    /// Delete expired cache records once and print how many were removed
    Expunge,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
        nameserver_port: cli.port,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting iterdns v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;
    let services = di::Services::new(&config, pool)?;

    match cli.command {
        Command::Resolve { domains } => commands::resolve(&services, &config, &domains).await,
        Command::Monitor => commands::monitor(&services, &config).await,
        Command::Expunge => commands::expunge(&services).await,
    }
}
