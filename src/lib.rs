//! A circular progress tracer: a ring with rounded ends split at the current
//! progress, plus a centered label.
//!
//! [`renderer::render`] is the pure drawing function. [`widget::ProgressTracer`]
//! keeps the mutable configuration on the host side and tracks when a new
//! layout or frame is needed, [`host::Host`] draws it onto an anti-aliased
//! [`surface::Surface`] and hands the frames to a [`tracer_hardware::Device`].
#![warn(clippy::pedantic)]
// Pixel math converts between integer and float coordinates everywhere.
#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]
#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    unused_qualifications
)]
#![deny(nonstandard_style)]

pub mod canvas;
pub mod geometry;
pub mod host;
pub mod measure;
pub mod path;
pub mod renderer;
pub mod settings;
pub mod surface;
pub mod widget;

pub use canvas::{Canvas, DrawCommand, LabelStyle, RecordingCanvas};
pub use host::Host;
pub use measure::MeasureSpec;
pub use renderer::render;
pub use settings::{DisplaySettings, TracerConfig};
pub use surface::Surface;
pub use widget::ProgressTracer;
