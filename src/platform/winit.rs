use crate::config::WindowConfig;
use crate::core::error::{EngineError, EngineResult};
use crate::platform::surface::Viewport;
use std::sync::Arc;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window as WinitWindowRaw, WindowBuilder};

#[derive(Clone)]
pub struct WinitWindow {
    window: Arc<WinitWindowRaw>,
}

impl WinitWindow {
    /// 按配置创建窗口
    pub fn try_new(event_loop: &EventLoop<()>, config: &WindowConfig) -> EngineResult<Self> {
        let win = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable)
            .build(event_loop)
            .map_err(|e| EngineError::Window(e.to_string()))?;
        Ok(Self {
            window: Arc::new(win),
        })
    }

    /// 共享句柄，供 GPU 表面持有
    pub fn shared(&self) -> Arc<WinitWindowRaw> {
        Arc::clone(&self.window)
    }
}

impl crate::platform::Window for WinitWindow {
    fn size(&self) -> (u32, u32) {
        let s = self.window.inner_size();
        (s.width, s.height)
    }
    fn viewport(&self) -> Viewport {
        let (width, height) = self.size();
        Viewport::new(width, height)
    }
    fn request_redraw(&self) {
        self.window.request_redraw();
    }
    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}
