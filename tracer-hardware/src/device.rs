use anyhow::{anyhow, Result};
use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    size: Size,
    /// One color per pixel, row-major, `size.width * size.height` entries.
    pixels: Vec<Rgb888>,
}

impl FrameBuffer {
    /// Creates a new `FrameBuffer` of the given size with every pixel set to
    /// `background`. Fails if the pixel count doesn't fit in a `u32`.
    pub fn new(size: Size, background: Rgb888) -> Result<Self> {
        let len = size
            .width
            .checked_mul(size.height)
            .ok_or_else(|| anyhow!("A {}x{} frame is too large", size.width, size.height))?;
        let pixels = vec![background; len as usize];
        Ok(Self { size, pixels })
    }

    /// Returns the color at `point`, or `None` if it lies outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        self.index(point).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgb888] {
        &self.pixels
    }

    fn index(&self, Point { x, y }: Point) -> Option<usize> {
        let (width, height) = (self.size.width as i32, self.size.height as i32);
        if x >= 0 && x < width && y >= 0 && y < height {
            Some((x + y * width) as usize)
        } else {
            None
        }
    }
}

/// This trait represents a device that can receive new images to be displayed.
pub trait Device {
    /// Sends a `FrameBuffer` to the device.
    fn draw(&mut self, display: &FrameBuffer) -> Result<()>;
    /// Convenience method for clearing the whole screen.
    /// Most implementations will send an empty `FrameBuffer` to `Device::draw`
    /// but there may be more efficient ways for some devices to implement here.
    fn clear(&mut self) -> Result<()>;
    /// Called once after the last frame.
    fn shutdown(&mut self) -> Result<()>;
}

impl Drawable for FrameBuffer {
    type Color = Rgb888;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, <D as DrawTarget>::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        target.fill_contiguous(&self.bounding_box(), self.pixels.iter().copied())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = anyhow::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(index) = self.index(coord) {
                self.pixels[index] = color;
            }
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}
