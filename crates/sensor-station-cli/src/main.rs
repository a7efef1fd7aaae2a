//! Sensor station — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use sensor_station_cli::config::resolve_seed;
use sensor_station_cli::session::StationSession;

#[derive(Parser)]
#[command(
    name = "sensor-station",
    about = "IoT monitoring station: register sensors, feed simulated Arduino readings, and process them",
    version
)]
struct Cli {
    /// Seed for the simulated Arduino (also reads SENSOR_STATION_SEED).
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive REPL mode (default).
    Repl,

    /// Run a scripted session against two simulated sensors.
    Demo {
        /// Number of simulated readings per sensor.
        #[arg(short, long, default_value_t = 5)]
        readings: usize,

        /// Print summaries and processing reports as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print simulated serial port info.
    Port,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   sensor-station completions bash > ~/.local/share/bash-completion/completions/sensor-station
    ///   sensor-station completions zsh > ~/.zfunc/_sensor-station
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let seed = resolve_seed(cli.seed);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            sensor_station_cli::repl::run(seed)?;
        }

        Commands::Demo { readings, json } => {
            let mut session = StationSession::open(seed);
            session.create_temperature("T-1")?;
            session.create_pressure("P-1")?;
            session.simulate("T-1", readings)?;
            session.simulate("P-1", readings)?;

            let before = session.describe_all()?;
            let processed = session.process_all()?;
            let after = session.describe_all()?;

            if json {
                let report = serde_json::json!({
                    "before": before,
                    "processed": processed,
                    "after": after,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{before}");
                println!();
                for entry in &processed {
                    println!("{entry}");
                }
                println!();
                println!("{after}");
            }
        }

        Commands::Port => {
            let session = StationSession::open(seed);
            println!("{}", session.port_info());
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "sensor-station", &mut std::io::stdout());
        }
    }

    Ok(())
}
