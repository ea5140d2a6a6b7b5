use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use pikaled::config::{Config, Opt, Output};
use pikaled::cycle::UpdateCycle;
use pikaled::display::{Display, MemoryDisplay};
use pikaled::feed::{DemoFeed, Feed, HttpFeed};
use pikaled::render::Board;
use pikaled::snapshot::PngDisplay;
use pikaled::{Error, Result};
use signal_hook::consts::{SIGINT, SIGTERM};
use structopt::StructOpt;

mod window;

const EXIT_FATAL: i32 = 1;

fn main() {
    env_logger::init();
    let opt = Opt::from_args();
    if let Err(err) = run(opt) {
        error!("{}", err);
        process::exit(EXIT_FATAL);
    }
}

fn run(opt: Opt) -> Result<()> {
    let config = Config::from_opt(opt)?;
    let (width, height) = config.wiring.physical_size();
    info!(
        "{}x{} LEDs ({} chained {}x{} panels, {}, 1:{} multiplexing), {} participant slots",
        width,
        height,
        config.panel.chain_length * config.panel.parallel,
        config.panel.cols,
        config.panel.rows,
        config.panel.hardware_mapping,
        config.panel.multiplexing,
        config.layout.tachi_size()
    );

    let board = Board::new(config.wiring.clone(), config.layout.clone())?;
    let feed: Box<dyn Feed> = if config.demo {
        info!("showing the demo pattern");
        Box::new(DemoFeed::new(board.tachi_size(), board.layout().arrows()))
    } else {
        info!("polling {} every {:?}", config.feed_url, config.interval);
        Box::new(HttpFeed::new(config.feed_url.as_str(), config.timeout))
    };
    let mut cycle = UpdateCycle::new(board, feed);

    match &config.output {
        Output::Window => window::run(cycle, config.interval),
        Output::Headless => {
            let mut display = MemoryDisplay::new(width, height);
            run_headless(&mut cycle, &mut display, config.interval)
        }
        Output::Snapshot(path) => {
            info!("writing frames to {}", path.display());
            let mut display = PngDisplay::new(width, height, path.clone());
            run_headless(&mut cycle, &mut display, config.interval)
        }
    }
}

fn run_headless<D: Display>(
    cycle: &mut UpdateCycle,
    display: &mut D,
    interval: Duration,
) -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&shutdown))
            .map_err(|err| Error::Config(format!("installing signal handler: {}", err)))?;
    }
    cycle.run(display, interval, &shutdown)
}
