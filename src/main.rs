use clap::Parser;
use hail::core::config;
use hail::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "hail", about = "Terminal ride-booking client")]
struct Args {
    /// Booking API base URL (overrides config and HAIL_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to hail.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("hail.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("hail: {e}");
            return Ok(());
        }
    };
    let resolved = config::resolve(&config, args.base_url.as_deref());

    log::info!("hail starting up against {}", resolved.base_url);

    tui::run(resolved)
}
