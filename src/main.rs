use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_DATA: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every team at an event, highest total first
    Score {
        /// Event key, e.g. 2019necmp
        event_key: String,

        /// Leave alliance selection (draft) points out
        #[arg(long)]
        no_draft: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Only show the first N teams
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the qualification points curve for a field size
    Quals {
        /// Number of ranked teams
        team_count: u32,
    },
    /// Write a starter config file with the default scoring tables
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "slff")]
#[command(about = "Fantasy FRC event scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/slff/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.map(PathBuf::from);

    let code = match cli.command {
        Commands::Score {
            event_key,
            no_draft,
            format,
            top,
        } => run_score(config_path, &event_key, no_draft, format, top, cli.verbose).await,
        Commands::Quals { team_count } => {
            if team_count == 0 {
                eprintln!("Team count must be at least 1.");
                EXIT_CONFIG
            } else {
                let points: Vec<u32> = (1..=team_count)
                    .map(|rank| slff::scoring::quals_points(rank, team_count))
                    .collect();
                println!("{}", slff::output::format_quals_curve(&points));
                EXIT_SUCCESS
            }
        }
        Commands::Init { force } => run_init(config_path, force),
    };

    std::process::exit(code);
}

async fn run_score(
    config_path: Option<PathBuf>,
    event_key: &str,
    no_draft: bool,
    format: OutputFormat,
    top: Option<usize>,
    verbose: bool,
) -> i32 {
    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Failed to install rustls crypto provider");
        return EXIT_NETWORK;
    }

    let start_time = Instant::now();

    let config = match slff::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    // Validate scoring tables at startup
    if let Err(errors) = slff::scoring::validate_tables(&config.scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return EXIT_CONFIG;
    }

    let api_key = match slff::credentials::resolve_api_key(&config.api) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            return EXIT_AUTH;
        }
    };

    let client = match slff::tba::create_client(&api_key, &config.api.base_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create TBA client: {:#}", e);
            return EXIT_NETWORK;
        }
    };

    if verbose {
        eprintln!("Fetching {} from {}", event_key, config.api.base_url);
    }

    let include_draft = config.scoring.include_draft && !no_draft;
    let scored = match slff::fetch::fetch_and_score_event(
        &client,
        event_key,
        &config.scoring,
        include_draft,
        verbose,
    )
    .await
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return if let Some(fetch_err) = e.downcast_ref::<slff::provider::FetchError>() {
                match fetch_err {
                    slff::provider::FetchError::Unauthorized => EXIT_AUTH,
                    _ => EXIT_NETWORK,
                }
            } else {
                EXIT_DATA
            };
        }
    };

    let records = &scored.score.records;
    let shown = &records[..top.unwrap_or(records.len()).min(records.len())];

    match format {
        OutputFormat::Table => {
            let use_colors = slff::output::should_use_colors();
            println!("{}", slff::output::format_table(shown, use_colors));
        }
        OutputFormat::Tsv => println!("{}", slff::output::format_tsv(shown)),
        OutputFormat::Json => match slff::output::format_json(shown) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                return EXIT_DATA;
            }
        },
    }

    if verbose {
        eprintln!();
        eprintln!(
            "Total: {} teams in {:?}",
            records.len(),
            start_time.elapsed()
        );
    }

    EXIT_SUCCESS
}

fn run_init(config_path: Option<PathBuf>, force: bool) -> i32 {
    let path = match config_path.map(Ok).unwrap_or_else(slff::config::get_config_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    match slff::config::write_default_config(&path, force) {
        Ok(()) => {
            println!("Wrote default config to {}", path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            EXIT_CONFIG
        }
    }
}
