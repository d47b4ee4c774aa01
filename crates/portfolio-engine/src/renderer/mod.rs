pub mod recording;
pub mod traits;

pub use recording::{RecordingSurface, SurfaceCommand};
pub use traits::{Color, OverlayStyle, Surface};
