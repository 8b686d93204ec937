use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use sitewise::config::{self, Config, DEFAULT_DELAY_MS};
use sitewise::export::{export_csv, export_json};
use sitewise::session::Session;
use sitewise::store::FileStore;
use sitewise::ui::App;

#[derive(Parser, Debug)]
#[command(name = "sitewise")]
#[command(about = "SiteWise - model buildings by chatting with a terminal assistant")]
#[command(version)]
struct Args {
    /// Directory for saved buildings, chat history and the log file
    #[arg(long, value_name = "DIR", env = "SITEWISE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Pause before each reply, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Run a command without the TUI and print the reply (repeatable)
    #[arg(short, long = "command", value_name = "TEXT")]
    commands: Vec<String>,

    /// Export the saved buildings to CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export the saved buildings to JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Delete all saved buildings and reset the chat
    #[arg(long)]
    clear: bool,
}

/// Log to a file in the data directory so the TUI is never drawn over.
fn init_logging(config: &Config) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
        .wrap_err_with(|| format!("failed to open log file {}", config.log_path().display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sitewise=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config = Config::new(
        args.data_dir.unwrap_or_else(config::default_data_dir),
        args.delay_ms,
    );
    fs::create_dir_all(&config.data_dir)
        .wrap_err_with(|| format!("failed to create data directory {}", config.data_dir.display()))?;
    init_logging(&config)?;

    let mut session = Session::new(FileStore::new(&config.data_dir), config.delay);

    if args.clear {
        session.clear_building();
        println!("Cleared saved buildings in {}", config.data_dir.display());
    }

    for command in &args.commands {
        if let Some(reply) = session.send_message(command) {
            println!("> {command}\n{reply}\n");
        }
    }

    if let Some(csv_path) = &args.csv {
        export_csv(session.collection(), csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(json_path) = &args.json {
        export_json(session.collection(), json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    if args.clear || !args.commands.is_empty() || args.csv.is_some() || args.json.is_some() {
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = App::new(session).run(terminal);
    ratatui::restore();
    result
}
