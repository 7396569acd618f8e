mod device;
#[cfg(feature = "png")]
mod png;
pub use device::{Device, FrameBuffer};
#[cfg(feature = "png")]
pub use png::PngDevice;
