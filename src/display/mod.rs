// Display module - system palette and RGBA frame assembly

mod framebuffer;
mod palette;

pub use framebuffer::FrameBuffer;
pub use palette::{palette_to_rgba, SYSTEM_PALETTE};
