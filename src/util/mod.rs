pub mod extent;
pub mod format;

pub use extent::*;
pub use format::PixelFormat;
