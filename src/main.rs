use clap::{ArgAction, Args, Parser, Subcommand};
use graveyard::commands::{config_cmd::ConfigOptions, remove::RemoveOptions, scan::ScanOptions};
use graveyard::commands::{execute_config, execute_remove, execute_scan};
use graveyard::error::AppError;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => {
            let options = ScanOptions {
                verbose: args.verbose,
                json: args.json,
                limit: args.limit,
                min_score: args.min_score,
            };
            execute_scan(options)?;
        }
        Commands::Remove(args) => {
            let options = RemoveOptions {
                name: args.name,
                verbose: args.verbose,
                assume_yes: args.yes,
            };
            execute_remove(options)?;
        }
        Commands::Config(args) => {
            let options = ConfigOptions {
                show_path: args.path,
                edit: args.edit,
                add_exclude: args.add_exclude,
                set_weight_size: args.weight_size,
                set_weight_days: args.weight_days,
            };
            execute_config(options)?;
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "graveyard",
    version,
    about = "Find the apps you installed but never use."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan installed applications and score them by abandonment likelihood.
    Scan(ScanArgs),
    /// Launch the recorded removal command for one application.
    Remove(RemoveArgs),
    /// Manage graveyard configuration (scorer weights, exclusions).
    Config(ConfigArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Show per-record provenance and skip diagnostics.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Print the scored records as JSON instead of a table.
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Show at most this many records (highest scores first).
    #[arg(short = 'n', long = "limit", value_name = "N")]
    limit: Option<usize>,

    /// Hide records scoring below this value.
    #[arg(long = "min-score", value_name = "SCORE")]
    min_score: Option<f64>,
}

#[derive(Args)]
struct RemoveArgs {
    /// Display name of the application to remove.
    #[arg(value_name = "NAME")]
    name: String,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue)]
    yes: bool,

    /// Show scan diagnostics while locating the application.
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// Show the configuration file path.
    #[arg(long = "path", action = ArgAction::SetTrue)]
    path: bool,

    /// Open the configuration file in $EDITOR.
    #[arg(long = "edit", action = ArgAction::SetTrue)]
    edit: bool,

    /// Add a display-name glob to hide from scan results.
    #[arg(long = "add-exclude", value_name = "GLOB")]
    add_exclude: Option<String>,

    /// Set the score weight applied per gigabyte.
    #[arg(long = "weight-size", value_name = "F")]
    weight_size: Option<f64>,

    /// Set the score weight applied per idle day.
    #[arg(long = "weight-days", value_name = "F")]
    weight_days: Option<f64>,
}
