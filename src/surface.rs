//! The anti-aliased surface frames are drawn on.
//!
//! Paths are filled by raqote, labels are drawn with embedded-graphics' mono
//! fonts straight into the same pixels. A finished surface is copied onto any
//! `Rgb888` draw target, usually a `FrameBuffer`.

use crate::{
    canvas::{Canvas, LabelStyle},
    geometry::PointF,
    path::PathSpec,
};
use anyhow::{bail, Result};
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    mono_font::MonoTextStyle,
    pixelcolor::{Rgb888, RgbColor},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable, Pixel,
};
use raqote::{DrawOptions, SolidSource, Source};
use std::{convert::Infallible, fmt};

fn solid(color: Rgb888) -> SolidSource {
    SolidSource::from_unpremultiplied_argb(0xFF, color.r(), color.g(), color.b())
}

/// The surface is always opaque, so premultiplied and straight colors match.
fn from_argb(argb: u32) -> Rgb888 {
    let [_, r, g, b] = argb.to_be_bytes();
    Rgb888::new(r, g, b)
}

fn to_argb(color: Rgb888) -> u32 {
    u32::from_be_bytes([0xFF, color.r(), color.g(), color.b()])
}

pub struct Surface {
    target: raqote::DrawTarget,
    size: Size,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface").field("size", &self.size).finish()
    }
}

impl Surface {
    /// Creates an opaque surface filled with `background`.
    pub fn new(size: Size, background: Rgb888) -> Result<Self> {
        let (Ok(width), Ok(height)) = (i32::try_from(size.width), i32::try_from(size.height))
        else {
            bail!("A {}x{} surface is too large", size.width, size.height);
        };
        if width == 0 || height == 0 {
            bail!("A {}x{} surface has no pixels", size.width, size.height);
        }
        if width.checked_mul(height).is_none() {
            bail!("A {}x{} surface is too large", size.width, size.height);
        }

        let mut target = raqote::DrawTarget::new(width, height);
        target.clear(solid(background));
        Ok(Self { target, size })
    }

    /// Returns the color at `point`, or `None` if it lies outside the surface.
    pub fn pixel(&self, point: Point) -> Option<Rgb888> {
        self.index(point)
            .map(|index| from_argb(self.target.get_data()[index]))
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgb888> + '_ {
        self.target.get_data().iter().copied().map(from_argb)
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

impl OriginDimensions for Surface {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Surface {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(index) = self.index(coord) {
                self.target.get_data_mut()[index] = to_argb(color);
            }
        }

        Ok(())
    }
}

impl Drawable for Surface {
    type Color = Rgb888;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        target.fill_contiguous(&self.bounding_box(), self.pixels())
    }
}

impl Canvas for Surface {
    type Error = Infallible;

    fn fill_path(&mut self, path: &PathSpec, color: Rgb888) -> Result<(), Self::Error> {
        self.target
            .fill(&path.to_path(), &Source::Solid(solid(color)), &DrawOptions::new());
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: PointF,
        style: &LabelStyle,
    ) -> Result<(), Self::Error> {
        if text.is_empty() || !origin.is_finite() {
            return Ok(());
        }
        let character_style = MonoTextStyle::new(style.font(), style.color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Alphabetic)
            .build();
        let position = Point::new(origin.x.round() as i32, origin.y.round() as i32);

        Text::with_text_style(text, position, character_style, text_style).draw(self)?;
        Ok(())
    }
}
