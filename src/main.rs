use clap::Parser;
use crtchat::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "crtchat", about = "Retro terminal chat over WebSocket")]
struct Args {
    /// WebSocket URL to connect to on startup
    #[arg(short, long)]
    url: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_parser = parse_level_arg)]
    log_level: Option<LevelFilter>,
}

fn parse_level_arg(value: &str) -> Result<LevelFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown log level '{value}'"))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            config::CrtConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            url: args.url,
            log_level: args.log_level,
        },
    );

    // The TUI owns the terminal, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
        }
        Err(e) => eprintln!(
            "Warning: cannot open log file {}: {e}",
            resolved.log_file.display()
        ),
    }

    // Config was resolved before the logger existed; report what it found now
    for warning in &resolved.warnings {
        eprintln!("Warning: {warning}");
        log::warn!("{}", warning);
    }
    if let Some(path) = config::config_path() {
        log::info!("Config file: {}", path.display());
    }
    log::info!("crtchat starting up (startup url: {:?})", resolved.url);

    crtchat::tui::run(resolved)
}
