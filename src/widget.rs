use crate::{
    canvas::Canvas,
    geometry::Ovals,
    measure::{self, MeasureSpec},
    renderer,
    settings::TracerConfig,
};
use embedded_graphics::{geometry::Size, pixelcolor::Rgb888};
use log::debug;

/// Host side state of a progress tracer.
///
/// The configuration is only mutated through setters; each setter asks for a
/// new layout and a redraw. Drawing hands an immutable view of the
/// configuration to the renderer.
#[derive(Debug, Clone)]
pub struct ProgressTracer {
    config: TracerConfig,
    size: u32,
    ovals: Ovals,
    invalidated: bool,
    layout_requested: bool,
}

macro_rules! setter {
    ($(#[$meta:meta])* $name:ident, $field:ident: $ty:ty) => {
        $(#[$meta])*
        pub fn $name(&mut self, value: $ty) {
            self.config.$field = value;
            self.request_layout();
        }
    };
}

impl ProgressTracer {
    pub fn new(config: TracerConfig) -> Self {
        Self {
            config,
            size: 0,
            ovals: Ovals::default(),
            invalidated: true,
            layout_requested: true,
        }
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn ovals(&self) -> &Ovals {
        &self.ovals
    }

    /// `true` when the last drawn frame no longer matches the configuration.
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    pub fn is_layout_requested(&self) -> bool {
        self.layout_requested
    }

    fn request_layout(&mut self) {
        self.invalidated = true;
        self.layout_requested = true;
    }

    setter!(
        /// Progress in percent. Values outside `0..=100` are stored as given
        /// and clamped when drawing.
        set_progress, progress: f32
    );
    setter!(set_thickness, thickness: f32);
    setter!(set_start_angle, start_angle: f32);
    setter!(set_arc_length, arc_length: f32);
    setter!(set_radius, radius: i32);
    setter!(set_padding, padding: u32);
    setter!(set_completed_color, completed_color: Rgb888);
    setter!(set_remaining_color, remaining_color: Rgb888);
    setter!(set_text_color, text_color: Rgb888);
    setter!(set_text_size, text_size: f32);

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.config.text = text.into();
        self.request_layout();
    }

    /// Replaces the whole configuration at once.
    pub fn set_config(&mut self, config: TracerConfig) {
        self.config = config;
        self.request_layout();
    }

    /// Resolves the square size the tracer wants under the given constraints.
    pub fn on_measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        measure::measure(width, height, self.config.radius, self.config.padding)
    }

    /// Recomputes the ring geometry for a `size` square.
    pub fn layout(&mut self, size: u32) {
        debug!("Laying out tracer at {}x{}", size, size);
        self.size = size;
        self.ovals = renderer::layout(size as f32, self.config.thickness);
        self.layout_requested = false;
    }

    /// Draws the current configuration with the last computed layout.
    pub fn draw<C>(&mut self, canvas: &mut C) -> Result<(), C::Error>
    where
        C: Canvas + ?Sized,
    {
        renderer::render_into(canvas, &self.config, &self.ovals)?;
        self.invalidated = false;
        Ok(())
    }
}

impl Default for ProgressTracer {
    fn default() -> Self {
        Self::new(TracerConfig::default())
    }
}
