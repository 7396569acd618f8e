#![warn(clippy::pedantic)]
#![deny(
    missing_debug_implementations,
    nonstandard_style,
    unused_qualifications
)]

use anyhow::Result;
use log::{info, LevelFilter};
use progress_tracer::{settings, DisplaySettings, Host, ProgressTracer, TracerConfig};
use simplelog::{Config as LoggerConfig, SimpleLogger};
use std::path::PathBuf;
use tracer_hardware::Device;

#[cfg(not(any(feature = "simulator", feature = "png")))]
compile_error!("Enable at least one output: the `png` or the `simulator` feature.");

#[cfg(feature = "simulator")]
use tokio::sync::broadcast;
#[cfg(feature = "simulator")]
use tracer_input::Command;
#[cfg(feature = "simulator")]
use tracer_simulator::Simulator;

#[cfg(all(feature = "png", not(feature = "simulator")))]
use tracer_hardware::PngDevice;

/// `$USER_CONFIG_DIR/progress-tracer/settings.toml`, then `./settings.toml`.
fn settings_dirs() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(user_config_dir) = dirs::config_dir() {
        paths.push(user_config_dir.join("progress-tracer"));
    }
    paths.push(PathBuf::from("."));
    paths
}

fn host<T: Device>(device: T, config: TracerConfig, display: &DisplaySettings) -> Host<T> {
    Host::new(
        device,
        ProgressTracer::new(config),
        display.size,
        display.background,
    )
    .with_progress_step(display.progress_step)
}

#[tokio::main]
#[allow(clippy::missing_errors_doc)]
pub async fn main() -> Result<()> {
    SimpleLogger::init(LevelFilter::Info, LoggerConfig::default())?;

    let settings = settings::load(&settings_dirs())?;
    let config = TracerConfig::from_settings(&settings)?;
    let display = DisplaySettings::from_settings(&settings)?;
    info!(
        "Drawing a {}x{} tracer surface at {}%",
        display.size.width, display.size.height, config.progress
    );

    #[cfg(feature = "simulator")]
    {
        // This channel is used to send commands to the host loop
        let (tx, rx) = broadcast::channel::<Command>(100);
        let device = Simulator::connect(display.size, tx.clone());
        let mut host = host(device, config, &display);

        ctrlc::set_handler(move || {
            info!("Ctrl + C received, shutting down!");
            tx.send(Command::Shutdown)
                .expect("Failed to send shutdown signal!");
        })?;

        host.run(rx).await?;
    }

    #[cfg(all(feature = "png", not(feature = "simulator")))]
    {
        // Without an input source a single frame is all there is to draw.
        let device = PngDevice::new(&display.output_path, display.size);
        let mut host = host(device, config, &display);
        host.frame()?;
        host.shutdown()?;
    }

    Ok(())
}
