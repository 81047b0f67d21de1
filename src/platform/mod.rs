pub mod surface;
pub mod winit;

pub use surface::{Surface, Viewport};

// ============================================================================
// Platform Window Abstraction
// ============================================================================

/// 平台窗口抽象
pub trait Window {
    fn size(&self) -> (u32, u32);
    fn viewport(&self) -> Viewport;
    fn request_redraw(&self);
    fn set_title(&self, title: &str);
}

/// 主循环关心的平台事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// 窗口尺寸变化
    Resized(Viewport),
    /// 请求重绘
    Redraw,
    /// 用户请求退出（关闭窗口或 Escape）
    Quit,
}
