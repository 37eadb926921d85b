use clap::Parser;
use cours::core::config::{self, CliOverrides};
use cours::core::prefs;
use cours::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "cours", about = "Browse the OFPPT course catalog", version)]
struct Args {
    /// Page to open at startup, e.g. /levels or /modules/12
    #[arg(short, long)]
    route: Option<String>,

    /// Catalog API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout")]
    timeout_secs: Option<u64>,

    /// Log level (error, warn, info, debug, trace, off)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cours: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            route: args.route,
            base_url: args.base_url,
            timeout_secs: args.timeout_secs,
            log_level: args.log_level,
        },
    );

    // Initialize file logger - writes to cours.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("cours.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Cours starting up: api={} start={}",
        resolved.base_url,
        resolved.start_route
    );

    let preferences = prefs::load();
    tui::run(resolved, preferences)
}
