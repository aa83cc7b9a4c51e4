use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cometwatch-cli", version, about = "Cometwatch CLI")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tracker status derived from a telemetry snapshot
    Status(commands::status::StatusArgs),
    /// Evaluate the countdown once
    Countdown(commands::countdown::CountdownArgs),
    /// Classify a distance into a proximity band
    Classify(commands::classify::ClassifyArgs),
    /// Run the tick driver and stream events
    Watch(commands::watch::WatchArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Status(args) => commands::status::run(args),
        Commands::Countdown(args) => commands::countdown::run(args),
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
