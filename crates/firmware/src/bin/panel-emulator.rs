//! Orbit Panel desktop emulator
//!
//! Runs the real control loop headless against a 240×240 simulator
//! framebuffer, fed by the simulated printer and a scripted gesture tour.
//! Every screen change is logged and, with `--shots DIR`, saved as a PNG.
//!
//! Run with:
//! `cargo run -p firmware --bin panel-emulator --features emulator -- [--seconds N] [--shots DIR] [--config FILE] [--dropout N]`
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]

use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Size;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use firmware::{
    run_status_task, ControlLoop, GraphicsRenderer, SimulatedPrinter, StatusTaskConfig,
    DISPLAY_HEIGHT, DISPLAY_WIDTH,
};
use platform::mocks::MockTouch;
use platform::{config::APP_NAME, PanelConfig, Theme, ThemeCycle, ValidConfig};
use tracing_subscriber::EnvFilter;
use ui::TouchEvent;

/// Control-loop period.
const STEP_MS: u64 = 20;

/// Time each start-up screen stays up.
const STARTUP_SCREEN_MS: u64 = 1_000;

/// Gesture tour: (ms after start-up, touch path). Each path is replayed one
/// point per loop pass, then released.
const TOUR: &[(u64, &[(i32, i32)])] = &[
    // swipe left: Idle → Printing
    (6_000, &[(200, 120), (160, 120), (110, 120)]),
    // swipe left: Printing → Paused
    (9_000, &[(200, 120), (160, 120), (110, 120)]),
    // tap: next theme, hand control back to the printer
    (12_000, &[(120, 200)]),
    // swipe up: brighter
    (15_000, &[(200, 200), (200, 150), (200, 100)]),
    // circle
    (18_000, &[(180, 60), (60, 60), (60, 180), (180, 180)]),
    // swipe right against the printer's state
    (25_000, &[(60, 120), (110, 120), (160, 120)]),
    // swipe down: dimmer
    (28_000, &[(40, 60), (40, 110), (40, 160)]),
];

/// Run the panel headless against the simulated printer.
#[derive(Parser, Debug)]
#[command(name = "panel-emulator", version)]
struct Args {
    /// How long to run, in seconds
    #[arg(long, default_value_t = 40)]
    seconds: u64,
    /// Save a PNG of every screen change into this directory
    #[arg(long)]
    shots: Option<PathBuf>,
    /// Panel configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report the printer offline on every n-th poll
    #[arg(long)]
    dropout: Option<u32>,
}

fn load_config(path: Option<&Path>) -> Result<ValidConfig> {
    let raw = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<PanelConfig>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => PanelConfig::default(),
    };
    raw.validate().context("invalid panel configuration")
}

type Panel = ControlLoop<MockTouch, GraphicsRenderer<SimulatorDisplay<Rgb565>>, ThemeCycle>;

fn save_shot(panel: &Panel, dir: &Path, index: u32, label: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{index:03}-{label}.png"));
    let settings = OutputSettingsBuilder::new().build();
    panel
        .renderer()
        .target()
        .to_rgb_output_image(&settings)
        .save_png(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "screenshot saved");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    tracing::info!("{} emulator, {}x{}", APP_NAME, DISPLAY_WIDTH, DISPLAY_HEIGHT);

    let started = std::time::Instant::now();
    let now = move || Instant::from_millis(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX));
    let pause = || tokio::time::sleep(StdDuration::from_millis(STARTUP_SCREEN_MS));

    let display = SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let mut panel: Panel = ControlLoop::new(
        &config,
        MockTouch::new(),
        GraphicsRenderer::new(display),
        ThemeCycle::new(Theme::Dark),
        now(),
    );

    panel.start(now())?;
    pause().await;
    panel.show_connecting(now())?;
    pause().await;
    panel.show_connected(now())?;
    pause().await;

    let (tx, mut rx) = tokio::sync::mpsc::channel(4);
    let printer = args
        .dropout
        .map_or_else(SimulatedPrinter::new, SimulatedPrinter::with_dropout);
    let status = run_status_task(printer, tx, StatusTaskConfig::from(&config));

    let ui = async {
        let tour_start = started.elapsed();
        let mut tour = TOUR.iter().peekable();
        let mut last_screen = panel.current_screen();
        let mut shots = 0u32;
        let deadline = StdDuration::from_secs(args.seconds);

        while started.elapsed() < deadline {
            let since_tour = started.elapsed().saturating_sub(tour_start);
            while let Some(&&(at, path)) = tour.peek() {
                if since_tour < StdDuration::from_millis(at) {
                    break;
                }
                panel
                    .touch_mut()
                    .stroke(path)
                    .map_err(|_| anyhow!("touch script queue full"))?;
                tour.next();
            }

            let snapshot = rx.try_recv().ok();
            let gesture = panel.tick(now(), snapshot)?;
            if gesture != TouchEvent::None {
                tracing::info!(?gesture, "gesture");
            }

            let screen = panel.current_screen();
            if screen != last_screen {
                tracing::info!(?screen, view = ?panel.machine().view_mode(), "screen");
                last_screen = screen;
                if let Some(dir) = args.shots.as_deref() {
                    shots += 1;
                    save_shot(&panel, dir, shots, &format!("{screen:?}").to_lowercase())?;
                }
            }

            tokio::time::sleep(StdDuration::from_millis(STEP_MS)).await;
        }
        Ok::<(), anyhow::Error>(())
    };

    tokio::select! {
        () = status => Ok(()),
        result = ui => result,
    }
}
