use clap::{Parser, Subcommand};
use pomocycle_core::{Config, DurationPreset};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "pomocycle", version, about = "Pomodoro cycle timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive timer
    Run(commands::timer::RunArgs),
    /// Print the duration table
    Table,
    /// Print the initial session state as JSON
    Status {
        /// Duration preset (fast or medium)
        #[arg(long)]
        preset: Option<DurationPreset>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("POMOCYCLE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_logging(&config);

    let result = match cli.command {
        Commands::Run(args) => commands::timer::run(args, &config),
        Commands::Table => commands::timer::table(),
        Commands::Status { preset } => {
            commands::timer::status(preset.unwrap_or(config.timer.default_preset))
        }
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
