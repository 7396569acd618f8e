use crate::{device::FrameBuffer, Device};
use anyhow::{Context, Result};
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use image::{Rgb, RgbImage};
use log::info;
use std::path::PathBuf;

/// Writes every frame it receives to a PNG file, replacing the previous one.
#[derive(Debug, Clone)]
pub struct PngDevice {
    path: PathBuf,
    size: Size,
}

impl PngDevice {
    pub fn new(path: impl Into<PathBuf>, size: Size) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

impl Device for PngDevice {
    fn draw(&mut self, display: &FrameBuffer) -> Result<()> {
        let size = display.size();
        let pixels = display.pixels();
        let image = RgbImage::from_fn(size.width, size.height, |x, y| {
            let color = pixels[(x + y * size.width) as usize];
            Rgb([color.r(), color.g(), color.b()])
        });

        image
            .save(&self.path)
            .with_context(|| format!("Failed to write frame to `{}`", self.path.display()))?;
        info!("Wrote {}x{} frame to {}", size.width, size.height, self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let new = FrameBuffer::new(self.size, Rgb888::WHITE)?;
        self.draw(&new)
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }
}
