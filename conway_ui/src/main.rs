// main.rs - Conway's Game of Life front end
// Parses the grid configuration, installs logging and opens the window

use clap::Parser;
use conway::config::{Config, DEFAULT_COLS, DEFAULT_INTERVAL_MS, DEFAULT_ROWS};
use eframe::egui;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod ui;

#[derive(Debug, Parser)]
#[command(name = "conway", about = "Conway's Game of Life on a fixed grid")]
struct Args {
    /// Number of grid rows.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
    /// Number of grid columns.
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,
    /// Milliseconds between generations while playing.
    #[arg(long = "interval-ms", value_name = "MILLISECONDS", default_value_t = DEFAULT_INTERVAL_MS)]
    interval_ms: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("conway=debug,conway_ui=info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::new(args.rows, args.cols, args.interval_ms)?;
    info!(
        rows = config.rows(),
        cols = config.cols(),
        interval_ms = config.interval_ms(),
        "starting"
    );

    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(ui::window_size(&config)),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(ui::LifeApp::new(cc, config, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with an error: {e}"))
}
