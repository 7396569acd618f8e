use crate::{measure::MeasureSpec, surface::Surface, widget::ProgressTracer};
use anyhow::Result;
use embedded_graphics::{geometry::Size, pixelcolor::Rgb888, Drawable};
use log::{debug, info, warn};
use tokio::sync::broadcast::{self, error::RecvError};
use tracer_hardware::{Device, FrameBuffer};
use tracer_input::Command;

/// Drives a `ProgressTracer` on a `Device`: lays it out when asked to, redraws
/// it when it was invalidated and applies incoming commands.
#[derive(Debug)]
pub struct Host<T: Device> {
    device: T,
    tracer: ProgressTracer,
    surface: Size,
    background: Rgb888,
    progress_step: f32,
}

impl<T: Device> Host<T> {
    pub fn new(device: T, tracer: ProgressTracer, surface: Size, background: Rgb888) -> Self {
        Self {
            device,
            tracer,
            surface,
            background,
            progress_step: 5.0,
        }
    }

    #[must_use]
    pub fn with_progress_step(mut self, step: f32) -> Self {
        self.progress_step = step;
        self
    }

    pub fn tracer(&self) -> &ProgressTracer {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut ProgressTracer {
        &mut self.tracer
    }

    pub fn device(&self) -> &T {
        &self.device
    }

    /// Runs one layout/draw pass. Returns `true` if a frame was sent to the
    /// device.
    pub fn frame(&mut self) -> Result<bool> {
        if self.tracer.is_layout_requested() {
            let size = self.tracer.on_measure(
                MeasureSpec::AtMost(self.surface.width),
                MeasureSpec::AtMost(self.surface.height),
            );
            self.tracer.layout(size.width);
        }

        if !self.tracer.is_invalidated() {
            return Ok(false);
        }

        let mut surface = Surface::new(self.surface, self.background)?;
        self.tracer.draw(&mut surface)?;
        let mut buffer = FrameBuffer::new(self.surface, self.background)?;
        surface.draw(&mut buffer)?;
        self.device.draw(&buffer)?;
        debug!("Drew frame at {}%", self.tracer.config().progress);
        Ok(true)
    }

    /// Applies `command`. Returns `false` once the host should stop.
    pub fn apply(&mut self, command: Command) -> bool {
        let progress = self.tracer.config().progress;
        match command {
            Command::IncreaseProgress => self
                .tracer
                .set_progress((progress + self.progress_step).clamp(0.0, 100.0)),
            Command::DecreaseProgress => self
                .tracer
                .set_progress((progress - self.progress_step).clamp(0.0, 100.0)),
            Command::Shutdown => return false,
        }
        true
    }

    /// Clears the device, then draws pending frames and applies commands
    /// until `Command::Shutdown` arrives or every sender is gone.
    pub async fn run(&mut self, mut rx: broadcast::Receiver<Command>) -> Result<()> {
        self.device.clear()?;
        loop {
            self.frame()?;
            match rx.recv().await {
                Ok(command) => {
                    debug!("Received {:?}", command);
                    if !self.apply(command) {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!("Skipped {} commands", skipped),
                Err(RecvError::Closed) => break,
            }
        }

        self.shutdown()
    }

    /// Releases the device. Call once after the last frame.
    pub fn shutdown(&mut self) -> Result<()> {
        info!("Shutting down");
        self.device.shutdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TracerConfig;
    use embedded_graphics::prelude::*;

    #[derive(Debug, Default)]
    struct Recorder {
        frames: Vec<FrameBuffer>,
        cleared: usize,
        shut_down: bool,
    }

    impl Device for Recorder {
        fn draw(&mut self, display: &FrameBuffer) -> Result<()> {
            self.frames.push(display.clone());
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            assert!(self.frames.is_empty(), "cleared after drawing");
            self.cleared += 1;
            Ok(())
        }

        fn shutdown(&mut self) -> Result<()> {
            self.shut_down = true;
            Ok(())
        }
    }

    fn host(progress: f32) -> Host<Recorder> {
        let config = TracerConfig {
            progress,
            radius: 60,
            thickness: 10.0,
            ..TracerConfig::default()
        };
        Host::new(
            Recorder::default(),
            ProgressTracer::new(config),
            Size::new(200, 100),
            Rgb888::WHITE,
        )
    }

    #[test]
    fn draws_only_when_invalidated() {
        let mut host = host(50.0);
        assert!(host.frame().unwrap());
        assert!(!host.frame().unwrap());
        assert_eq!(host.device().frames.len(), 1);

        host.tracer_mut().set_text("50%");
        assert!(host.frame().unwrap());
        assert_eq!(host.device().frames.len(), 2);
    }

    #[test]
    fn tracer_fits_the_smaller_side() {
        let mut host = host(50.0);
        host.frame().unwrap();
        assert_eq!(host.tracer().size(), 100);

        let frame = &host.device().frames[0];
        assert_eq!(frame.size(), Size::new(200, 100));
        // Nothing is drawn right of the tracer's square, give or take the
        // anti-aliased edge.
        assert!((102..200).all(|x| (0..100).all(|y| frame.pixel(Point::new(x, y)) == Some(Rgb888::WHITE))));
        assert!(frame.pixels().iter().any(|c| *c == Rgb888::BLACK));
    }

    #[test]
    fn commands_move_progress_within_bounds() {
        let mut host = host(97.0).with_progress_step(5.0);
        assert!(host.apply(Command::IncreaseProgress));
        assert_eq!(host.tracer().config().progress, 100.0);

        for _ in 0..30 {
            host.apply(Command::DecreaseProgress);
        }
        assert_eq!(host.tracer().config().progress, 0.0);
        assert!(host.tracer().is_invalidated());

        assert!(!host.apply(Command::Shutdown));
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let (tx, rx) = broadcast::channel(16);
        tx.send(Command::IncreaseProgress).unwrap();
        tx.send(Command::Shutdown).unwrap();
        tx.send(Command::IncreaseProgress).unwrap();

        let mut host = host(10.0);
        host.run(rx).await.unwrap();

        assert_eq!(host.tracer().config().progress, 15.0);
        assert_eq!(host.device().cleared, 1);
        assert_eq!(host.device().frames.len(), 2);
        assert!(host.device().shut_down);
    }

    #[tokio::test]
    async fn run_stops_when_senders_are_gone() {
        let (tx, rx) = broadcast::channel(16);
        tx.send(Command::DecreaseProgress).unwrap();
        drop(tx);

        let mut host = host(10.0);
        host.run(rx).await.unwrap();

        assert_eq!(host.tracer().config().progress, 5.0);
        assert_eq!(host.device().cleared, 1);
        assert_eq!(host.device().frames.len(), 2);
        assert!(host.device().shut_down);
    }

    #[test]
    fn single_frame_then_shutdown() {
        let mut host = host(40.0);
        assert!(host.frame().unwrap());
        host.shutdown().unwrap();

        assert_eq!(host.device().cleared, 0);
        assert_eq!(host.device().frames.len(), 1);
        assert!(host.device().shut_down);
    }

    #[test]
    fn oversized_surfaces_are_errors() {
        let mut host = Host::new(
            Recorder::default(),
            ProgressTracer::default(),
            Size::new(70_000, 70_000),
            Rgb888::WHITE,
        );
        assert!(host.frame().is_err());
        assert!(host.device().frames.is_empty());
    }
}
