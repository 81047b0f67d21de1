//! 软件光栅化画布
//!
//! RGBA8 帧缓冲，实现 `Surface`。粗线沿 Bresenham 路径盖印边长为
//! `width` 的方形笔刷；实心圆按 `dx² + dy² <= r²` 填充，半径 0 不绘制。
//! 所有图元都裁剪到视口内。

use crate::core::error::RenderResult;
use crate::platform::surface::{Surface, Viewport};
use crate::render::color::Rgb;
use glam::IVec2;

/// CPU 帧缓冲
#[derive(Debug, Clone)]
pub struct Canvas {
    viewport: Viewport,
    pixels: Vec<[u8; 4]>,
    presented_frames: u64,
}

impl Canvas {
    pub fn new(viewport: Viewport) -> Self {
        let mut canvas = Self {
            viewport,
            pixels: vec![[0; 4]; Self::buffer_len(viewport)],
            presented_frames: 0,
        };
        canvas.clear(Rgb::BLACK);
        canvas
    }

    fn buffer_len(viewport: Viewport) -> usize {
        viewport.width as usize * viewport.height as usize
    }

    /// 原始 RGBA8 数据，行优先
    pub fn frame(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    /// 已提交的帧数
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    /// 读取像素；越界返回 `None`
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let [r, g, b, _] = self.pixels[self.index(IVec2::new(x, y))?];
        Some(Rgb::new(r, g, b))
    }

    /// 非黑像素数量
    pub fn lit_pixels(&self) -> usize {
        self.pixels
            .iter()
            .filter(|[r, g, b, _]| *r != 0 || *g != 0 || *b != 0)
            .count()
    }

    fn index(&self, p: IVec2) -> Option<usize> {
        if !self.viewport.contains(p) {
            return None;
        }
        Some(p.y as usize * self.viewport.width as usize + p.x as usize)
    }

    /// 写入单个像素，越界忽略
    pub fn put_pixel(&mut self, p: IVec2, color: Rgb) {
        if let Some(idx) = self.index(p) {
            self.pixels[idx] = color.to_rgba();
        }
    }

    /// 以 `center` 为中心盖印边长为 `size` 的方形笔刷
    fn stamp(&mut self, center: IVec2, size: u32, color: Rgb) {
        if size <= 1 {
            self.put_pixel(center, color);
            return;
        }
        let lo = -((size as i32 - 1) / 2);
        let hi = size as i32 / 2;
        for dy in lo..=hi {
            for dx in lo..=hi {
                self.put_pixel(center + IVec2::new(dx, dy), color);
            }
        }
    }
}

impl Surface for Canvas {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color.to_rgba());
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2, width: u32, color: Rgb) -> RenderResult<()> {
        let d = IVec2::new((to.x - from.x).abs(), -(to.y - from.y).abs());
        let step = IVec2::new(
            if from.x < to.x { 1 } else { -1 },
            if from.y < to.y { 1 } else { -1 },
        );
        let mut err = d.x + d.y;
        let mut p = from;

        loop {
            self.stamp(p, width, color);
            if p == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= d.y {
                err += d.y;
                p.x += step.x;
            }
            if e2 <= d.x {
                err += d.x;
                p.y += step.y;
            }
        }
        Ok(())
    }

    fn fill_circle(&mut self, center: IVec2, radius: u32, color: Rgb) -> RenderResult<()> {
        if radius == 0 {
            return Ok(());
        }
        let r = radius as i32;
        let r2 = r * r;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r2 {
                    self.put_pixel(center + IVec2::new(dx, dy), color);
                }
            }
        }
        Ok(())
    }

    fn present(&mut self) -> RenderResult<()> {
        self.presented_frames += 1;
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.pixels = vec![[0; 4]; Self::buffer_len(viewport)];
        self.clear(Rgb::BLACK);
    }
}
