//! radspberry - play a demo patch and watch the output pipeline
//!
//! Run with: cargo run
//! Set RADSPBERRY_LOG=<file> to capture engine logs (the terminal is taken
//! over by the UI, so logs never go to stderr).

mod patch;
mod ui;

use std::{fs::File, sync::Mutex};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use radspberry::{AudioEngine, Delivery, EngineConfig, Player};
use tracing_subscriber::EnvFilter;

use ui::UiApp;

/// Samples of headroom between the fill thread and the scope.
const TAP_CAPACITY: usize = 8192;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let patch = patch::demo()?;

    let engine = AudioEngine::with_default_device(EngineConfig::default())
        .wrap_err("failed to set up the audio engine")?;
    let (tap_tx, tap_rx) = rtrb::RingBuffer::new(TAP_CAPACITY);
    let mut player = Player::new(engine).with_tap(tap_tx);

    player
        .play(patch.root, 0.5, Delivery::Buffered)
        .wrap_err("failed to start playback")?;

    let mut terminal = ratatui::init();
    let result = UiApp::new(player, tap_rx, patch.controls).run(&mut terminal);
    ratatui::restore();

    result
}

fn init_logging() -> EyreResult<()> {
    let Some(path) = std::env::var_os("RADSPBERRY_LOG") else {
        return Ok(());
    };

    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.to_string_lossy()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
