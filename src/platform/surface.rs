//! 显示表面抽象
//!
//! 核心只通过这个 trait 绘制：清屏、画线、画实心圆、提交帧、查询视口。
//! 桌面端由 `render::presenter::WindowSurface` 实现，测试与基准使用
//! `render::canvas::Canvas`。

use crate::core::error::RenderResult;
use crate::render::color::Rgb;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// 视口尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 点是否落在视口内
    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// 显示表面
///
/// 单次绘制失败只影响该图元，帧内其余绘制照常进行；`present` 失败
/// 意味着无法再产出任何帧，由调用方终止主循环。
pub trait Surface {
    /// 当前视口尺寸，用于约束新星体的位置
    fn viewport(&self) -> Viewport;

    /// 以纯色清屏
    fn clear(&mut self, color: Rgb);

    /// 从 `from` 到 `to` 画一条宽度为 `width` 的直线
    fn draw_line(&mut self, from: IVec2, to: IVec2, width: u32, color: Rgb) -> RenderResult<()>;

    /// 在 `center` 画半径为 `radius` 的实心圆
    fn fill_circle(&mut self, center: IVec2, radius: u32, color: Rgb) -> RenderResult<()>;

    /// 提交当前帧
    fn present(&mut self) -> RenderResult<()>;

    /// 视口尺寸变化
    fn resize(&mut self, viewport: Viewport);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_contains() {
        let vp = Viewport::new(800, 600);
        assert!(vp.contains(IVec2::new(0, 0)));
        assert!(vp.contains(IVec2::new(799, 599)));
        assert!(!vp.contains(IVec2::new(800, 10)));
        assert!(!vp.contains(IVec2::new(-1, 10)));
    }

    #[test]
    fn test_viewport_empty() {
        assert!(Viewport::new(0, 600).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
    }
}
