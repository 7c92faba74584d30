use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "catfeeder", version, about = "Keep a virtual pet fed")]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Adopt a pet (onboarding)
    Adopt(commands::adopt::AdoptArgs),
    /// Pet settings
    Pet {
        #[command(subcommand)]
        action: commands::pet::PetAction,
    },
    /// Show the pet's hunger and deliver due alerts
    Status {
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Feed the pet
    Feed {
        /// Number of portions
        #[arg(long, default_value = "1")]
        times: u32,
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Keep the pet on screen with a live hunger tick
    Run,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CATFEEDER_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Adopt(args) => commands::adopt::run(args),
        Commands::Pet { action } => commands::pet::run(action),
        Commands::Status { json } => commands::status::run(json),
        Commands::Feed { times, json } => commands::feed::run(times, json),
        Commands::Run => commands::session::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "catfeeder", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
