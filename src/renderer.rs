//! Turns a `TracerConfig` into draw calls.
//!
//! The first path drawn is called "remaining" and runs from the start angle to
//! the division point, with the rounded cap at the start. The "completed" path
//! runs from the division point to the end of the arc, with the rounded cap at
//! the far end. Both are filled, they are never stroked.

use crate::{
    canvas::{Canvas, LabelStyle},
    geometry::{self, Ovals},
    path::PathSpec,
    settings::TracerConfig,
};
use log::{trace, warn};

/// Where the ring starts, how long it is and how much of it is done.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sweep {
    pub start_deg: f32,
    pub arc_len_deg: f32,
    pub progress: f32,
}

impl Sweep {
    pub fn division(&self) -> f32 {
        geometry::division_angle(self.progress, self.arc_len_deg)
    }
}

impl From<&TracerConfig> for Sweep {
    fn from(config: &TracerConfig) -> Self {
        Self {
            start_deg: config.start_angle,
            arc_len_deg: config.arc_length,
            progress: config.progress,
        }
    }
}

/// Computes the ovals for a `size` square and warns when the ring is too
/// thick for it. The geometry is returned unchanged either way.
pub fn layout(size: f32, thickness: f32) -> Ovals {
    if thickness * 2.0 >= size {
        warn!(
            "Arc thickness {} does not fit a {}px tracer, the inner edge is inverted",
            thickness, size
        );
    }
    geometry::layout(size, thickness)
}

/// Outer arc up to the division point, back along the inner edge, then the
/// half circle cap at the start.
pub fn build_remaining_path(sweep: &Sweep, ovals: &Ovals, thickness: f32) -> PathSpec {
    let division = sweep.division();
    let cap = geometry::cap_oval_in(&ovals.outer, thickness, sweep.start_deg);

    let mut path = PathSpec::new();
    path.arc_to(ovals.outer, sweep.start_deg, division)
        .arc_to(ovals.inner, sweep.start_deg + division, -division)
        .arc_to(cap, sweep.start_deg, -180.0)
        .close();
    path
}

/// Outer arc from the division point to the end, the half circle cap at the
/// end, then back along the inner edge.
pub fn build_completed_path(sweep: &Sweep, ovals: &Ovals, thickness: f32) -> PathSpec {
    let division = sweep.division();
    let end = sweep.start_deg + sweep.arc_len_deg;
    let rest = sweep.arc_len_deg - division;
    let cap = geometry::cap_oval_in(&ovals.outer, thickness, end);

    let mut path = PathSpec::new();
    path.arc_to(ovals.outer, sweep.start_deg + division, rest)
        .arc_to(cap, end, 180.0)
        .arc_to(ovals.inner, end, -rest)
        .close();
    path
}

/// Draws the tracer into the `size` square at the canvas origin.
pub fn render<C>(canvas: &mut C, config: &TracerConfig, size: f32) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    let ovals = layout(size, config.thickness);
    render_into(canvas, config, &ovals)
}

/// Same as `render`, with the ovals already computed.
pub fn render_into<C>(canvas: &mut C, config: &TracerConfig, ovals: &Ovals) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    let sweep = Sweep::from(config);
    trace!(
        "Rendering tracer: progress {}%, division at {}°",
        config.progress,
        sweep.start_deg + sweep.division()
    );

    let remaining = build_remaining_path(&sweep, ovals, config.thickness);
    canvas.fill_path(&remaining, config.remaining_color)?;

    let completed = build_completed_path(&sweep, ovals, config.thickness);
    canvas.fill_path(&completed, config.completed_color)?;

    let style = LabelStyle {
        color: config.text_color,
        size: config.text_size,
    };
    canvas.draw_text(&config.text, ovals.outer.center(), &style)
}
