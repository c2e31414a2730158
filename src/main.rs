mod app;
mod config;
mod upload;
mod utils;

use app::MultiUploader;
use clap::Parser;
use config::Config;
use tracing::{error, Level};
use tracing_subscriber::filter::EnvFilter;

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), eframe::Error> {
    let config = Config::parse();
    init_logging(config.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("upload-worker")
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start upload runtime: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([600.0, 600.0])
            .with_min_inner_size([400.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "File Upload",
        options,
        Box::new(move |cc| Box::new(MultiUploader::new(cc, &config, runtime))),
    )
}
