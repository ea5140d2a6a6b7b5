use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use structopt::StructOpt;

use crate::error::{Error, Result};
use crate::layout::LayoutTable;
use crate::wiring::WiringConfig;

/// Longest accepted update interval or feed timeout: one day.
pub const MAX_DELAY_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, StructOpt)]
#[structopt(name = "pikaled", about = "Live kyudo scoreboard on chained LED panels.")]
pub struct Opt {
    /// Scoreboard JSON endpoint.
    #[structopt(
        long,
        env = "PIKALED_FEED_URL",
        default_value = "http://127.0.0.1:8000/api/scoreboard"
    )]
    pub feed_url: String,

    /// Delay between two board updates.
    #[structopt(long, default_value = "1000")]
    pub interval_ms: u64,

    /// Give up on a feed request after this long.
    #[structopt(long, default_value = "5000")]
    pub timeout_ms: u64,

    /// Wiring table (JSON) for the installed chains.
    #[structopt(long, parse(from_os_str))]
    pub wiring: Option<PathBuf>,

    /// Slot layout table (JSON).
    #[structopt(long, parse(from_os_str))]
    pub layout: Option<PathBuf>,

    #[structopt(long, default_value = "16")]
    pub panel_rows: usize,

    #[structopt(long, default_value = "32")]
    pub panel_cols: usize,

    #[structopt(long, default_value = "18")]
    pub chain_length: usize,

    #[structopt(long, default_value = "1")]
    pub parallel: usize,

    #[structopt(long, default_value = "4")]
    pub multiplexing: usize,

    #[structopt(long, default_value = "adafruit-hat")]
    pub hardware_mapping: String,

    /// Run without the simulator window.
    #[structopt(long)]
    pub headless: bool,

    /// Write every committed frame to this PNG (implies --headless).
    #[structopt(long, parse(from_os_str))]
    pub snapshot: Option<PathBuf>,

    /// Show the built-in test pattern instead of polling the feed.
    #[structopt(long)]
    pub demo: bool,
}

/// Geometry of the chained panels as the matrix driver sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelOptions {
    pub rows: usize,
    pub cols: usize,
    pub chain_length: usize,
    pub parallel: usize,
    pub multiplexing: usize,
    pub hardware_mapping: String,
}

impl PanelOptions {
    pub fn led_count(&self) -> usize {
        self.rows * self.cols * self.chain_length * self.parallel
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Window,
    Headless,
    Snapshot(PathBuf),
}

/// Startup configuration, built once and then only read.
#[derive(Clone, Debug)]
pub struct Config {
    pub feed_url: String,
    pub interval: Duration,
    pub timeout: Duration,
    pub wiring: WiringConfig,
    pub layout: LayoutTable,
    pub panel: PanelOptions,
    pub output: Output,
    pub demo: bool,
}

impl Config {
    pub fn from_opt(opt: Opt) -> Result<Self> {
        let wiring = match &opt.wiring {
            Some(path) => load_json(path)?,
            None => WiringConfig::pikaled(),
        };
        let layout = match &opt.layout {
            Some(path) => load_json(path)?,
            None => LayoutTable::pikaled(),
        };
        let panel = PanelOptions {
            rows: opt.panel_rows,
            cols: opt.panel_cols,
            chain_length: opt.chain_length,
            parallel: opt.parallel,
            multiplexing: opt.multiplexing,
            hardware_mapping: opt.hardware_mapping,
        };

        let (width, height) = wiring.physical_size();
        if panel.led_count() != width * height {
            return Err(Error::Config(format!(
                "{} chained LEDs cannot drive a {}x{} wiring table",
                panel.led_count(),
                width,
                height
            )));
        }
        if opt.interval_ms == 0 {
            return Err(Error::Config("--interval-ms must be positive".into()));
        }
        for (flag, value) in [("--interval-ms", opt.interval_ms), ("--timeout-ms", opt.timeout_ms)] {
            if value > MAX_DELAY_MS {
                return Err(Error::Config(format!(
                    "{} {} exceeds the {} ms limit",
                    flag, value, MAX_DELAY_MS
                )));
            }
        }

        let output = match (opt.snapshot, opt.headless) {
            (Some(path), _) => Output::Snapshot(path),
            (None, true) => Output::Headless,
            (None, false) => Output::Window,
        };

        Ok(Self {
            feed_url: opt.feed_url,
            interval: Duration::from_millis(opt.interval_ms),
            timeout: Duration::from_millis(opt.timeout_ms),
            wiring,
            layout,
            panel,
            output,
            demo: opt.demo,
        })
    }
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .map_err(|err| Error::Config(format!("reading {}: {}", path.display(), err)))?;
    serde_json::from_str(&text)
        .map_err(|err| Error::Config(format!("loading {}: {}", path.display(), err)))
}
