use crate::{geometry::PointF, path::PathSpec};
use embedded_graphics::{
    mono_font::{iso_8859_15, MonoFont},
    pixelcolor::Rgb888,
};
use std::convert::Infallible;

/// Fonts available for labels, ordered by glyph height.
static FONTS: [&MonoFont<'static>; 13] = [
    &iso_8859_15::FONT_4X6,
    &iso_8859_15::FONT_5X7,
    &iso_8859_15::FONT_5X8,
    &iso_8859_15::FONT_6X9,
    &iso_8859_15::FONT_6X10,
    &iso_8859_15::FONT_6X12,
    &iso_8859_15::FONT_6X13,
    &iso_8859_15::FONT_7X13,
    &iso_8859_15::FONT_8X13,
    &iso_8859_15::FONT_7X14,
    &iso_8859_15::FONT_9X15,
    &iso_8859_15::FONT_9X18,
    &iso_8859_15::FONT_10X20,
];

/// How a label is drawn. Labels are always centered horizontally on their
/// origin, with the origin on the text baseline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelStyle {
    pub color: Rgb888,
    /// Font height in pixels.
    pub size: f32,
}

impl LabelStyle {
    /// The largest font whose glyphs are no taller than `size`, or the
    /// smallest font when none fits.
    pub fn font(&self) -> &'static MonoFont<'static> {
        FONTS
            .iter()
            .rev()
            .find(|font| font.character_size.height as f32 <= self.size)
            .copied()
            .unwrap_or(FONTS[0])
    }
}

/// The drawing operations the tracer needs from a surface. `Surface` draws
/// them, `RecordingCanvas` keeps them for inspection.
pub trait Canvas {
    type Error;

    /// Fills `path` using the non-zero winding rule.
    fn fill_path(&mut self, path: &PathSpec, color: Rgb888) -> Result<(), Self::Error>;

    /// Draws `text` horizontally centered on `origin`, with `origin` on the
    /// baseline.
    fn draw_text(&mut self, text: &str, origin: PointF, style: &LabelStyle)
        -> Result<(), Self::Error>;
}

/// A single call made against a `RecordingCanvas`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillPath {
        path: PathSpec,
        color: Rgb888,
    },
    DrawText {
        text: String,
        origin: PointF,
        style: LabelStyle,
    },
}

/// Canvas that keeps every draw call instead of rasterizing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    type Error = Infallible;

    fn fill_path(&mut self, path: &PathSpec, color: Rgb888) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: PointF,
        style: &LabelStyle,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin,
            style: *style,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;

    fn style(size: f32) -> LabelStyle {
        LabelStyle {
            color: Rgb888::BLACK,
            size,
        }
    }

    #[test]
    fn picks_largest_fitting_font() {
        assert_eq!(style(40.0).font().character_size, Size::new(10, 20));
        assert_eq!(style(13.0).font().character_size, Size::new(8, 13));
        assert_eq!(style(14.0).font().character_size, Size::new(7, 14));
        assert_eq!(style(10.5).font().character_size, Size::new(6, 10));
    }

    #[test]
    fn falls_back_to_smallest_font() {
        assert_eq!(style(2.0).font().character_size, Size::new(4, 6));
        assert_eq!(style(f32::NAN).font().character_size, Size::new(4, 6));
    }

    #[test]
    fn recording_canvas_keeps_call_order() {
        let mut canvas = RecordingCanvas::new();
        let path = PathSpec::new();
        canvas.fill_path(&path, Rgb888::RED).unwrap();
        canvas
            .draw_text("x", PointF::new(1.0, 2.0), &style(12.0))
            .unwrap();

        assert!(matches!(canvas.commands[0], DrawCommand::FillPath { color, .. } if color == Rgb888::RED));
        assert!(matches!(&canvas.commands[1], DrawCommand::DrawText { text, .. } if text == "x"));
    }
}
