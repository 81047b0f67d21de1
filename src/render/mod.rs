pub mod canvas;
pub mod color;
pub mod frame;
pub mod presenter;

pub use canvas::Canvas;
pub use color::{color_at, Rgb};
pub use frame::{FrameRenderer, FrameStats};
pub use presenter::{GpuPresenter, WindowSurface};
